/*
[INPUT]:  CLI subcommand implementations
[OUTPUT]: Module declarations for interactive flows
[POS]:    CLI layer entry
[UPDATE]: When adding CLI flows
*/

pub mod init;
pub mod play;
