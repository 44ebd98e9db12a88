mod common;
pub use self::common::{Field, PeriodAlignment, Query, WireFormat};

mod ticker;
pub use self::ticker::TickerQuery;

mod data;
pub use self::data::DataQuery;
