pub mod assets;
pub mod audio;
pub mod cli;
pub mod sim;
pub mod wav;
