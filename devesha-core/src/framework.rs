use sqlx::PgPool;

/// Executes entity query/command messages against the connection pool.
///
/// Every database operation is a message type with a
/// `kanau::processor::Processor` impl on this struct.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
