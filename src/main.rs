use std::path::Path;

use anyhow::Result;
use exam_portal_client::{App, Config};

const CONFIG_FILE: &str = "portal.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 有配置文件时优先使用，否则读环境变量
    let config = if Path::new(CONFIG_FILE).exists() {
        Config::from_toml_file(Path::new(CONFIG_FILE))?
    } else {
        Config::from_env()
    };

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
