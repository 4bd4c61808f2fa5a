// Host runtime for the mBot Neo educational robot
//
// Movement requests are resolved against stored defaults and sent, together
// with display, audio and Wi-Fi commands, to a hardware bridge over zenoh.

pub mod buttons;
pub mod bus;
pub mod config;
pub mod demo;
pub mod hal;
pub mod http;
pub mod messages;
pub mod motion;
pub mod robot;
pub mod runtime;
