mod series;
pub use self::series::{Series, TimeSeries};

mod metadata;
pub use self::metadata::{Attributes, LastUpdated, Metadata};
