use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// IDでユーザーを取得する（存在しなければNone）
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;
}
