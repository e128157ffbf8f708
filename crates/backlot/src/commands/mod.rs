//! Command handlers.
//!
//! Each resource gets its own module; the shared plumbing here wires CLI
//! flags into a real `ListController` (seeded URL state) and a real
//! `MutationCoordinator` (console notifier), the same components an
//! embedding UI would use.

pub mod articles;
pub mod brands;
pub mod categories;
pub mod config_cmd;
pub mod equipment;
pub mod staff;
pub mod util;

use std::sync::Arc;

use backlot_api::ApiClient;
use backlot_core::{
    ListController, MemoryUrlState, MutationCoordinator, Notify, ResourceCache, ResourceOps,
    UrlState,
};

use crate::cli::{Command, GlobalOpts, ListOpts};
use crate::error::CliError;
use crate::output::{self, ConsoleNotify};

/// Shared per-invocation context.
pub struct Context {
    pub client: Arc<ApiClient>,
}

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Brands(args) => brands::handle(args, ctx, global).await,
        Command::Categories(args) => categories::handle(args, ctx, global).await,
        Command::Equipment(args) => equipment::handle(args, ctx, global).await,
        Command::Articles(args) => articles::handle(args, ctx, global).await,
        Command::Staff(args) => staff::handle(args, ctx, global).await,
        // Handled in main before a client is built.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Build a list controller whose URL state is seeded from CLI flags.
///
/// `extra` carries resource-specific convenience filters (e.g.
/// `("isActive", Some("true"))`); absent values are omitted.
pub(crate) fn controller_for<O: ResourceOps>(
    ops: Arc<O>,
    opts: &ListOpts,
    extra: &[(&str, Option<String>)],
) -> Result<ListController<O>, CliError> {
    let cache = ResourceCache::shared(ops.namespace());
    let query = util::seed_query(opts, extra)?;
    let url: Arc<dyn UrlState> = Arc::new(MemoryUrlState::new(query));
    Ok(ListController::new(ops, cache, url).with_retries(1))
}

/// Build a mutation coordinator wired to the console notifier.
pub(crate) fn coordinator_for<O: ResourceOps>(
    ops: Arc<O>,
    global: &GlobalOpts,
) -> MutationCoordinator<O> {
    let cache = ResourceCache::shared(ops.namespace());
    let notify: Arc<dyn Notify> = Arc::new(ConsoleNotify {
        quiet: global.quiet,
        color: output::should_color(&global.color),
    });
    MutationCoordinator::new(ops, cache).with_notify(notify)
}
