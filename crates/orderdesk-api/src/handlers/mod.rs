pub mod order_submit;
