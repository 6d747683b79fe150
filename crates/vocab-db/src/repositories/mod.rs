// All repository functions are generic over `E: Executor<'e, Database = Sqlite>`
// so they accept both a `&SqlitePool` (direct query) and a `&mut SqliteConnection`
// borrowed from a `Transaction` (atomic operations).

pub mod card;
pub mod review;
