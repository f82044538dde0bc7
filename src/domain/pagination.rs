use serde::{Deserialize, Serialize};

use super::PaginationError;

/// ページ指定（ページ番号, ページサイズ）
///
/// 不変条件：size > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 読み飛ばす行数（page * size）
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// 純粋関数：(from, size) をページ指定に変換する
///
/// - どちらかが未指定ならページングなし（`Ok(None)`）
/// - from < 0、size < 0、size == 0 はエラー
/// - ページ番号は from / size（整数除算）
///
/// `from` は行オフセットではなくページ番号の算出にだけ使われる。
/// from=5, size=10 はページ0になり、ページ内のずれは捨てられる。
pub fn resolve_page(
    from: Option<i64>,
    size: Option<i64>,
) -> Result<Option<PageRequest>, PaginationError> {
    let (Some(from), Some(size)) = (from, size) else {
        return Ok(None);
    };

    let invalid = PaginationError { from, size };
    if from < 0 || size <= 0 {
        return Err(invalid);
    }

    let page = u32::try_from(from / size).map_err(|_| invalid.clone())?;
    let size = u32::try_from(size).map_err(|_| invalid)?;

    Ok(Some(PageRequest { page, size }))
}
