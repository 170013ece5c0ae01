//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by the guard, consent and auth layers.

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアント側ユーティリティ層で発生するエラーの分類を定義します。
/// 各バリアントは HTTP ホストで使用するステータスコードにマッピングされます。
///
/// | 分類 | 既定の扱い |
/// |------|-----------|
/// | `Decode` / `Parse` | より緩い解釈にフォールバック、または「値なし」として扱う |
/// | `NotFound` | 通常の「値なし」 |
/// | `TooManyRequests` | 呼び出し側へ `false` として返す |
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Decode;
/// assert_eq!(kind.status_code(), 422);
/// assert!(kind.fails_open());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 入力値が検証に失敗
    InvalidInput,
    /// 401 - サインインしていない
    Unauthorized,
    /// 404 - Cookie やストレージのエントリが存在しない
    NotFound,
    /// 422 - 難読化データや base64 のデコード失敗（鍵の不一致を含む）
    Decode,
    /// 422 - JSON の解析失敗
    Parse,
    /// 429 - レート制限超過
    TooManyRequests,
    /// 500 - 内部エラー
    Internal,
    /// 507 - クライアントストレージの容量超過
    StorageFull,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.status_code(), 400);
    /// assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Decode | ErrorKind::Parse => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::Internal => 500,
            ErrorKind::StorageFull => 507,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Decode => "Decode Failure",
            ErrorKind::Parse => "Parse Failure",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::Internal => "Internal Error",
            ErrorKind::StorageFull => "Storage Full",
        }
    }

    /// 既定のポリシーで「フェイルオープン」する種別かどうか
    ///
    /// `true` の場合、呼び出し側は生の値を使うか「値なし」として扱い、
    /// エラーを利用者に見せません。
    #[inline]
    pub const fn fails_open(&self) -> bool {
        matches!(
            self,
            ErrorKind::Decode | ErrorKind::Parse | ErrorKind::NotFound | ErrorKind::StorageFull
        )
    }

    /// サーバー側のエラーかどうかを判定
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// クライアント側のエラーかどうかを判定
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::InvalidInput.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Decode.status_code(), 422);
        assert_eq!(ErrorKind::Parse.status_code(), 422);
        assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
        assert_eq!(ErrorKind::StorageFull.status_code(), 507);
    }

    #[test]
    fn test_fails_open() {
        assert!(ErrorKind::Decode.fails_open());
        assert!(ErrorKind::Parse.fails_open());
        assert!(ErrorKind::NotFound.fails_open());
        assert!(ErrorKind::StorageFull.fails_open());
        assert!(!ErrorKind::TooManyRequests.fails_open());
        assert!(!ErrorKind::Unauthorized.fails_open());
        assert!(!ErrorKind::Internal.fails_open());
    }

    #[test]
    fn test_server_and_client_errors() {
        assert!(ErrorKind::Internal.is_server_error());
        assert!(ErrorKind::StorageFull.is_server_error());
        assert!(!ErrorKind::Decode.is_server_error());
        assert!(ErrorKind::TooManyRequests.is_client_error());
        assert!(!ErrorKind::Internal.is_client_error());
    }
}
