pub mod bank_transaction_type;
pub mod fee_type;
pub mod http_method;
pub mod order_type;
pub mod side;
pub mod withdraw_permission;
