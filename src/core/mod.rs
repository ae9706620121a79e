pub mod metric;
pub mod record;
pub mod scale;
pub mod types;

pub use metric::{AxisRole, Metric};
pub use record::{CensusRecord, MarginOfError};
pub use scale::LinearScale;
pub use types::{Margins, PixelOffset, PlotLayout, PointerPosition, Viewport};
