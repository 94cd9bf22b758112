//! Request Identity - Authenticated caller vocabulary
//!
//! Defines [`CurrentUser`], the identity attached to a request once the
//! session gate has resolved its session token.

/// 認証済みユーザーの識別情報
///
/// セッションゲートが Cookie のトークンを検証した後、
/// リクエストの extensions に挿入します。保護されたハンドラは
/// `Extension<CurrentUser>` で取り出して利用します。
///
/// ## Examples
/// ```rust
/// use kernel::identity::CurrentUser;
///
/// let user = CurrentUser {
///     email: "alice@example.com".to_string(),
/// };
/// assert_eq!(user.email, "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// ユーザーを一意に識別するメールアドレス
    pub email: String,
}
