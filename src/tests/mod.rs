mod device_controller_tests;
mod store_tests;
mod utils;
