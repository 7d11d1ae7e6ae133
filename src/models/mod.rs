mod intent;
mod record;

pub use intent::{BulkReceipt, BulkWriteIntent, LineItem, WriteMode};
pub use record::{SpendingRecord, OTHER_CATEGORY};
