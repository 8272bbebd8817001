//! Built-in seed lexicon.
//!
//! A small gloss-dictionary-format body plus a few leveled rows that
//! guarantee the merged set is non-empty and the sampler useful even when no
//! external source file is configured or reachable. Seeds run through the
//! normal parse→merge pipeline as the lowest-precedence source.

use crate::domain::{LexicalRecord, SRC_SEED};
use crate::sources::gloss_dict;

const SEED_GLOSS_LINES: &str = "\
你好 你好 [ni3 hao3] /hello (HSK 1)/hi/
謝謝 谢谢 [xie4 xie5] /thanks (HSK 1)/to thank/
再見 再见 [zai4 jian4] /goodbye (HSK 1)/see you again/
學校 学校 [xue2 xiao4] /school (HSK 1)/
老師 老师 [lao3 shi1] /teacher (HSK 1)/
學生 学生 [xue2 sheng5] /student (HSK 1)/
朋友 朋友 [peng2 you5] /friend (HSK 1)/
喜歡 喜欢 [xi3 huan5] /to like (HSK 1)/to be fond of/
咖啡 咖啡 [ka1 fei1] /coffee (HSK 2)/
天氣 天气 [tian1 qi4] /weather (HSK 1)/
工作 工作 [gong1 zuo4] /work (HSK 1)/job/to work/
公司 公司 [gong1 si1] /company (HSK 2)/corporation/
會議 会议 [hui4 yi4] /meeting (HSK 3)/conference/
旅行 旅行 [lv3 xing2] /to travel (HSK 2)/journey/
飛機 飞机 [fei1 ji1] /airplane (HSK 1)/
醫生 医生 [yi1 sheng1] /doctor (HSK 1)/
醫院 医院 [yi1 yuan4] /hospital (HSK 1)/
身體 身体 [shen1 ti3] /body (HSK 2)/health/
電腦 电脑 [dian4 nao3] /computer (HSK 1)/
手機 手机 [shou3 ji1] /mobile phone (HSK 2)/cell phone/
餐廳 餐厅 [can1 ting1] /restaurant (HSK 3)/dining hall/
市場 市场 [shi4 chang3] /market (HSK 4)/marketplace/
經理 经理 [jing1 li3] /manager (HSK 4)/to manage/
健康 健康 [jian4 kang1] /health (HSK 3)/healthy/
鍛煉 锻炼 [duan4 lian4] /to exercise (HSK 3)/to toughen/
護照 护照 [hu4 zhao4] /passport (HSK 4)/
行李 行李 [xing2 li5] /luggage (HSK 4)/baggage/
網絡 网络 [wang3 luo4] /internet (HSK 4)/network/
軟件 软件 [ruan3 jian4] /software (HSK 5)/
貿易 贸易 [mao4 yi4] /trade (HSK 5)/commerce/
合同 合同 [he2 tong5] /contract (HSK 5)/agreement/
宏觀 宏观 [hong2 guan1] /macroscopic (HSK7)/macro-/
";

/// Seed records, parsed from the embedded gloss-dictionary body and tagged
/// as the seed source.
pub fn seed_records() -> Vec<LexicalRecord> {
  gloss_dict::parse_tagged(SEED_GLOSS_LINES, SRC_SEED)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seeds_parse_cleanly_with_levels_stripped_from_glosses() {
    let recs = seed_records();
    assert!(recs.len() >= 30);
    assert!(recs.iter().all(|r| r.source_tag == SRC_SEED));
    assert!(recs.iter().all(|r| r.level.is_some()));
    assert!(recs.iter().all(|r| !r.gloss.to_lowercase().contains("hsk")));
    let school = recs.iter().find(|r| r.headword == "学校").unwrap();
    assert_eq!(school.level, Some(1));
    assert_eq!(school.gloss, "school");
  }

  #[test]
  fn seeds_cover_multiple_levels() {
    let recs = seed_records();
    let mut levels: Vec<u8> = recs.iter().filter_map(|r| r.level).collect();
    levels.sort_unstable();
    levels.dedup();
    assert!(levels.len() >= 4, "levels covered: {:?}", levels);
  }
}
