pub mod stats_handler;
