// Session orchestration — submission lifecycle, progress polling, keep-alive.

pub mod controller;
pub mod heartbeat;
pub mod poller;
pub mod view;
