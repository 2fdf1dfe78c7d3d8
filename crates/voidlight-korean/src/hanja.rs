//! Hanja -> Hangul conversion via a small common-character table.
//!
//! This is not a full Hanja dictionary (that requires an external data
//! file); it covers the characters common enough to show up in ordinary
//! documents (numerals, common surnames, frequent vocabulary).

use once_cell::sync::Lazy;
use std::collections::HashMap;

static HANJA_TABLE: Lazy<HashMap<char, char>> = Lazy::new(|| {
    HashMap::from([
        ('一', '일'),
        ('二', '이'),
        ('三', '삼'),
        ('四', '사'),
        ('五', '오'),
        ('六', '육'),
        ('七', '칠'),
        ('八', '팔'),
        ('九', '구'),
        ('十', '십'),
        ('年', '년'),
        ('月', '월'),
        ('日', '일'),
        ('人', '인'),
        ('大', '대'),
        ('韓', '한'),
        ('國', '국'),
        ('民', '민'),
        ('金', '김'),
        ('李', '이'),
        ('朴', '박'),
        ('學', '학'),
        ('校', '교'),
        ('生', '생'),
        ('水', '수'),
        ('火', '화'),
        ('山', '산'),
        ('中', '중'),
    ])
});

/// Replaces every Hanja character with its Hangul reading where the table
/// has an entry; characters without one are left as-is.
pub fn hanja_to_hangul(text: &str) -> String {
    text.chars()
        .map(|c| HANJA_TABLE.get(&c).copied().unwrap_or(c))
        .collect()
}
