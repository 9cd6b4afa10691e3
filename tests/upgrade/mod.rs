//! End-to-end upgrade runs against scripted tools.
//!
//! Most tests drive [`upgrade_chromedriver::orchestrator::run`] through a
//! [`Toolbox`](upgrade_chromedriver::Toolbox) of scripted stand-ins inside a
//! throwaway directory tree, then inspect the reported lines and the
//! resulting files. The `cli` module spawns the compiled binary itself to
//! pin its exit codes.


mod cli;
mod failures;
