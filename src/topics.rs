//! Topic matcher: maps a free-text topic label to the entries judged
//! relevant to it.
//!
//! Keyword tables are injectable configuration data (TOML overrides merge
//! over the built-in defaults) so the matcher is testable with synthetic
//! topics. An entry matches when its headword is in the topic's keyword set,
//! its gloss contains the topic label (case-insensitive), or its gloss
//! contains any keyword (case-insensitive substring).

use std::collections::HashMap;

use crate::domain::MergedEntry;

#[derive(Clone, Debug, Default)]
pub struct TopicTable {
  // label (lowercased) → keywords (headwords and gloss substrings mixed)
  topics: HashMap<String, Vec<String>>,
}

impl TopicTable {
  /// Curated default topics. Keyword sets mix Chinese headwords with English
  /// gloss substrings; both sides of the match rules use them.
  pub fn builtin() -> Self {
    let mut t = TopicTable::default();
    t.insert("business", &[
      "公司", "工作", "经理", "市场", "合同", "会议", "银行", "价格", "贸易", "老板",
      "company", "market", "trade", "contract", "manager", "money", "price", "office",
    ]);
    t.insert("travel", &[
      "旅行", "旅游", "飞机", "火车", "机场", "护照", "酒店", "地图", "票", "行李",
      "travel", "trip", "airport", "hotel", "passport", "luggage", "ticket", "tourist",
    ]);
    t.insert("food", &[
      "吃", "喝", "饭", "菜", "茶", "咖啡", "水果", "肉", "面条", "餐厅",
      "eat", "drink", "food", "meal", "dish", "restaurant", "fruit", "noodle", "tea",
    ]);
    t.insert("family", &[
      "家", "爸爸", "妈妈", "哥哥", "姐姐", "弟弟", "妹妹", "孩子", "爷爷", "奶奶",
      "family", "father", "mother", "brother", "sister", "child", "parent", "grand",
    ]);
    t.insert("school", &[
      "学校", "老师", "学生", "考试", "作业", "上课", "大学", "课本", "学习", "毕业",
      "school", "teacher", "student", "exam", "study", "lesson", "homework", "university",
    ]);
    t.insert("health", &[
      "医院", "医生", "病", "药", "身体", "健康", "感冒", "锻炼", "疼", "护士",
      "health", "doctor", "hospital", "medicine", "illness", "sick", "exercise", "body",
    ]);
    t.insert("technology", &[
      "电脑", "手机", "网络", "软件", "上网", "电子", "科技", "程序", "数据", "屏幕",
      "computer", "phone", "internet", "software", "network", "digital", "data", "screen",
    ]);
    t.insert("nature", &[
      "山", "河", "树", "花", "天气", "下雨", "太阳", "动物", "海", "风",
      "mountain", "river", "tree", "flower", "weather", "rain", "animal", "sea", "wind",
    ]);
    t
  }

  fn insert(&mut self, label: &str, keywords: &[&str]) {
    self
      .topics
      .insert(label.to_lowercase(), keywords.iter().map(|s| s.to_string()).collect());
  }

  /// Merge configured keyword sets over the defaults (whole-set replacement
  /// per label, so a config can also retune a built-in topic).
  pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> Self {
    for (label, kws) in overrides {
      self.topics.insert(label.to_lowercase(), kws.clone());
    }
    self
  }

  pub fn keywords(&self, topic: &str) -> &[String] {
    self
      .topics
      .get(&topic.to_lowercase())
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  /// Relevance test for one entry against one topic label.
  pub fn matches(&self, topic: &str, entry: &MergedEntry) -> bool {
    let label = topic.trim().to_lowercase();
    if label.is_empty() {
      return false;
    }
    let gloss = entry.gloss.to_lowercase();
    if !gloss.is_empty() && gloss.contains(&label) {
      return true;
    }
    for kw in self.keywords(&label) {
      if *kw == entry.headword {
        return true;
      }
      let kw_lower = kw.to_lowercase();
      if !gloss.is_empty() && gloss.contains(&kw_lower) {
        return true;
      }
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{LexicalRecord, MergedEntry, SRC_GLOSS_DICT};

  fn entry(head: &str, gloss: &str) -> MergedEntry {
    let mut r = LexicalRecord::new(head, SRC_GLOSS_DICT);
    r.gloss = gloss.to_string();
    MergedEntry::from_record(r)
  }

  fn synthetic() -> TopicTable {
    let mut overrides = HashMap::new();
    overrides.insert("sports".to_string(), vec!["足球".to_string(), "ball".to_string()]);
    TopicTable::builtin().with_overrides(&overrides)
  }

  #[test]
  fn matches_by_headword_keyword() {
    assert!(synthetic().matches("Sports", &entry("足球", "soccer")));
    assert!(!synthetic().matches("Sports", &entry("篮子", "basket")));
  }

  #[test]
  fn matches_by_topic_label_in_gloss() {
    // No "weather" topic configured; label substring match still applies.
    assert!(synthetic().matches("weather", &entry("天气", "weather")));
  }

  #[test]
  fn matches_by_keyword_substring_case_insensitive() {
    assert!(synthetic().matches("sports", &entry("皮球", "rubber Ball")));
  }

  #[test]
  fn unknown_topic_without_gloss_hit_matches_nothing() {
    assert!(!synthetic().matches("astronomy", &entry("公司", "company")));
    assert!(!synthetic().matches("", &entry("公司", "company")));
  }

  #[test]
  fn overrides_replace_whole_keyword_set() {
    let mut overrides = HashMap::new();
    overrides.insert("business".to_string(), vec!["股票".to_string()]);
    let t = TopicTable::builtin().with_overrides(&overrides);
    assert_eq!(t.keywords("business"), ["股票".to_string()]);
  }
}
