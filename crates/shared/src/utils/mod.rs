mod image;
mod logs;
mod otel;
mod shutdown;
mod timestamp;

pub use self::image::{IMAGE_MISSING, IMAGE_TOO_LARGE, IMAGE_UNREADABLE, encode_image};
pub use self::logs::Logger;
pub use self::otel::TracingContext;
pub use self::shutdown::shutdown_signal;
pub use self::timestamp::{TIMESTAMP_FORMAT, format_timestamp, now_timestamp};
