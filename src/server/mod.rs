//! Accept loop: one task per connection.

pub mod listener;
