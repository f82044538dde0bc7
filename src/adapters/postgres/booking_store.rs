use crate::domain::{
    Booking, BookingFilter, BookingId, BookingQuery, BookingStatus, Item, ItemId, NewBooking,
    SortOrder, Subject, UserId,
};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::str::FromStr;

/// 予約とアイテムを結合したSELECT句
///
/// 所有者による絞り込みとアイテム情報の復元のため、常に items と結合する。
const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.id,
        b.start_date,
        b.end_date,
        b.status,
        b.booker_id,
        i.id AS item_id,
        i.name AS item_name,
        i.available AS item_available,
        i.owner_id AS item_owner_id
    FROM bookings b
    JOIN items i ON i.id = b.item_id
"#;

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        id: BookingId::new(row.get("id")),
        start: row.get("start_date"),
        end: row.get("end_date"),
        status,
        item: Item {
            id: ItemId::new(row.get("item_id")),
            name: row.get("item_name"),
            available: row.get("item_available"),
            owner_id: UserId::new(row.get("item_owner_id")),
        },
        booker_id: UserId::new(row.get("booker_id")),
    })
}

/// 問い合わせをSQLに組み立てる
fn build_query(query: &BookingQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_BOOKINGS);

    builder.push(" WHERE ");
    match query.subject {
        Subject::Booker(id) => builder.push("b.booker_id = ").push_bind(id.value()),
        Subject::Owner(id) => builder.push("i.owner_id = ").push_bind(id.value()),
    };

    match query.filter {
        BookingFilter::Any => {}
        BookingFilter::ActiveAt(t) => {
            builder
                .push(" AND b.start_date < ")
                .push_bind(t)
                .push(" AND b.end_date > ")
                .push_bind(t);
        }
        BookingFilter::EndedBefore(t) => {
            builder.push(" AND b.end_date < ").push_bind(t);
        }
        BookingFilter::StartsAfter(t) => {
            builder.push(" AND b.start_date > ").push_bind(t);
        }
        BookingFilter::Status(status) => {
            builder.push(" AND b.status = ").push_bind(status.as_str());
        }
    }

    builder.push(match query.order {
        SortOrder::EndDesc => " ORDER BY b.end_date DESC, b.id ASC",
        SortOrder::EndAsc => " ORDER BY b.end_date ASC, b.id ASC",
    });

    if let Some(page) = query.page {
        builder
            .push(" LIMIT ")
            .push_bind(i64::from(page.size()))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
    }

    builder
}

/// BookingStoreのPostgreSQL実装
///
/// 行ロックやトランザクションは使わない（同時更新は後勝ち）。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(booking.range.start())
        .bind(booking.range.end())
        .bind(booking.item.id.value())
        .bind(booking.booker_id.value())
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Booking {
            id: BookingId::new(id),
            start: booking.range.start(),
            end: booking.range.end(),
            status: booking.status,
            item: booking.item,
            booker_id: booking.booker_id,
        })
    }

    /// 予約を保存（upsert）
    async fn save(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                item_id = EXCLUDED.item_id,
                booker_id = EXCLUDED.booker_id,
                status = EXCLUDED.status
            "#,
        )
        .bind(booking.id.value())
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.item.id.value())
        .bind(booking.booker_id.value())
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", SELECT_BOOKINGS))
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn query(&self, query: &BookingQuery) -> Result<Vec<Booking>> {
        let rows = build_query(query).build().fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_for_item_and_booker_ending_before(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{} WHERE b.item_id = $1 AND b.booker_id = $2 AND b.end_date < $3",
            SELECT_BOOKINGS
        ))
        .bind(item_id.value())
        .bind(booker_id.value())
        .bind(instant)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_last_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "{} WHERE b.item_id = $1 AND b.start_date <= $2 ORDER BY b.end_date DESC, b.id ASC LIMIT 1",
            SELECT_BOOKINGS
        ))
        .bind(item_id.value())
        .bind(instant)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn find_next_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "{} WHERE b.item_id = $1 AND b.start_date > $2 AND b.status <> 'REJECTED' ORDER BY b.start_date ASC, b.id ASC LIMIT 1",
            SELECT_BOOKINGS
        ))
        .bind(item_id.value())
        .bind(instant)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }
}
