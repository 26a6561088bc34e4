//! 値オブジェクト定義
//!
//! 不正な値がドメインに入り込まないよう、コンストラクタで検証します。
//! 空メッセージ・空の表示名はここで弾かれ、ルーティングまで到達しません。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use idobata_shared::time::timestamp_to_clock_time;

use super::error::ValueError;

/// 表示名の最大長（文字数）
pub const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// セッション ID
///
/// 接続ごとにサーバが採番する不透明な識別子。表示名とは独立で、
/// 接続が生きている間は再利用されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// 新しい SessionId を作成（空文字列は不可）
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::EmptySessionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// SessionId のファクトリ
///
/// UUID v4 で接続ごとに新しい識別子を採番します。
pub struct SessionIdFactory;

impl SessionIdFactory {
    pub fn generate() -> SessionId {
        SessionId::new(Uuid::new_v4().to_string()).expect("UUID v4 is never empty")
    }
}

/// 表示名
///
/// 接続時にクライアントが申告する名前。グローバルに一意である保証はなく、
/// 同じ名前のセッションが複数存在し得ます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// 新しい DisplayName を作成（トリム後に空、または長すぎる場合は不可）
    pub fn new(value: String) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyDisplayName);
        }
        let chars = trimmed.chars().count();
        if chars > MAX_DISPLAY_NAME_CHARS {
            return Err(ValueError::DisplayNameTooLong(chars));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ本文
///
/// 空（トリム後に空を含む）の本文はここで拒否されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::EmptyMessage);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 低解像度の壁時計時刻（`H:M`、0 埋めなし）
///
/// チャットメッセージに刻印される時刻。日付・秒・タイムゾーンを持たない
/// 意図的に粗い形式で、既知の制約としてそのまま維持しています。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(String);

impl ClockTime {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// タイムスタンプ（ミリ秒）から `H:M` 形式の時刻を作成
    pub fn from_millis(timestamp_millis: i64) -> Self {
        Self(timestamp_to_clock_time(timestamp_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_rejects_empty_string() {
        // テスト項目: 空文字列から SessionId を作成できない
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = SessionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::EmptySessionId));
    }

    #[test]
    fn test_session_id_factory_generates_unique_ids() {
        // テスト項目: ファクトリが呼び出しごとに異なる ID を採番する
        // given (前提条件):

        // when (操作):
        let id1 = SessionIdFactory::generate();
        let id2 = SessionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名の前後の空白がトリムされる
        // given (前提条件):
        let value = "  Alice  ".to_string();

        // when (操作):
        let name = DisplayName::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_display_name_rejects_empty_string() {
        // テスト項目: トリム後に空になる表示名は拒否される
        // given (前提条件):
        let value = " \t ".to_string();

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::EmptyDisplayName));
    }

    #[test]
    fn test_display_name_rejects_too_long_name() {
        // テスト項目: 最大長を超える表示名は拒否される
        // given (前提条件):
        let value = "a".repeat(MAX_DISPLAY_NAME_CHARS + 1);

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueError::DisplayNameTooLong(MAX_DISPLAY_NAME_CHARS + 1))
        );
    }

    #[test]
    fn test_display_name_is_not_unique_by_construction() {
        // テスト項目: 同じ表示名を複数回作成できる（一意性は強制されない）
        // given (前提条件):

        // when (操作):
        let name1 = DisplayName::new("Alice".to_string()).unwrap();
        let name2 = DisplayName::new("Alice".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(name1, name2);
    }

    #[test]
    fn test_message_body_rejects_empty_string() {
        // テスト項目: 空のメッセージ本文は拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = MessageBody::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::EmptyMessage));
    }

    #[test]
    fn test_message_body_rejects_whitespace_only() {
        // テスト項目: 空白のみのメッセージ本文は拒否される
        // given (前提条件):
        let value = "   \n ".to_string();

        // when (操作):
        let result = MessageBody::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::EmptyMessage));
    }

    #[test]
    fn test_message_body_preserves_content() {
        // テスト項目: 有効な本文はそのまま保持される
        // given (前提条件):
        let value = "hello world".to_string();

        // when (操作):
        let body = MessageBody::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(body.as_str(), "hello world");
    }

    #[test]
    fn test_clock_time_from_millis_is_low_resolution() {
        // テスト項目: タイムスタンプから 0 埋めなしの H:M 形式が生成される
        // given (前提条件):
        // 2023-01-01 09:05:42 JST in milliseconds
        let timestamp = 1672531542000;

        // when (操作):
        let time = ClockTime::from_millis(timestamp);

        // then (期待する結果):
        assert_eq!(time.as_str(), "9:5");
    }
}
