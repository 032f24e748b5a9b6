use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// 选择题
    MultipleChoice,
    /// 论述题
    Essay,
    /// 写作
    Writing,
    /// 口语
    Speaking,
    /// 数学题
    Math,
    /// 填空题
    FillInTheBlank,
    /// 无法识别的类型
    #[serde(other)]
    Other,
}

impl QuestionType {
    /// 是否是选项作答的题目
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice)
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::MultipleChoice
    }
}

/// 考试中的单道题目（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub question_type: QuestionType,
}

impl Question {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

// 选项既可能是字符串数组，也可能是 {"A": "...", "B": "..."} 形式的对象
fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use std::collections::BTreeMap;
    use std::fmt;

    struct OptionsVisitor;

    impl<'de> Visitor<'de> for OptionsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of option strings or a map of option letters")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut options = Vec::new();
            while let Some(option) = seq.next_element::<String>()? {
                options.push(option);
            }
            Ok(options)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut ordered = BTreeMap::new();
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                ordered.insert(key, value);
            }
            Ok(ordered.into_values().collect())
        }
    }

    deserializer.deserialize_any(OptionsVisitor)
}
