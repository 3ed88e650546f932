use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValueError;

/// 日付の入力形式（YYYY-MM-DD）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 利用者ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍ID - カタログの集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 貸出申請ID - 貸出台帳の集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorrowRequestId(Uuid);

impl BorrowRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BorrowRequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// メールアドレス
///
/// 入力された表記のまま保持し、比較は小文字化した値で行う。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// # エラー
    /// 空文字（空白のみを含む）の場合は`ValueError::Empty`
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty("email"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 一意性判定に使う正規化済みの値
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Email {}

/// 書籍タイトル（大文字小文字を区別せずに一意）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty("title"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for BookTitle {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for BookTitle {}

/// 貸出期間（両端を含む）
///
/// 開始日 <= 終了日 は検証しない。逆転した期間もそのまま保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// YYYY-MM-DD 形式の文字列から期間を作成する
    ///
    /// # エラー
    /// どちらかの日付が解析できない場合は`ValueError::InvalidDate`
    pub fn parse(start: &str, end: &str) -> Result<Self, ValueError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(Self { start, end })
    }

    /// 2つの期間が1日でも重なるか
    ///
    /// [s1,e1] と [s2,e2] は s1 <= e2 かつ e1 >= s2 のとき重なる。
    /// 境界日の共有も重なりとみなす。
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// 開始日が終了日より後になっているか
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValueError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValueError::InvalidDate(raw.to_string()))
}
