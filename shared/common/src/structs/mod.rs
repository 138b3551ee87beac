mod credentials;
pub use credentials::*;

mod currency_pair;
pub use currency_pair::*;

mod fee_query;
pub use fee_query::*;

mod ticker_summary;
pub use ticker_summary::*;

mod order_book_summary;
pub use order_book_summary::*;

mod order_submission;
pub use order_submission::*;

mod price_level;
pub use price_level::*;
