//! Zorin Background - register numbered images as a timed desktop background.
//!
//! A timed background is a GNOME slideshow document that cross-fades through
//! a directory of images. Registering one copies the images into the system
//! backgrounds directory, writes the slideshow document and adds it to the
//! wallpaper registry read by the appearance settings.

pub mod background;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod registration;
pub mod registry;
