use crate::context::AppContext;
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::Result;
use movieflix_models::WatchlistEntry;

pub async fn run_watchlist(cmd: WatchlistCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    let client = ctx.watchlist();

    match cmd {
        WatchlistCommands::List => {
            output.banner(&format!("Watchlist for user {}", ctx.session.user()));
            let spinner = output.spinner("Loading watchlist...");
            let view = client.load(&mut ctx.session).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            output.watchlist(&view);
        }
        WatchlistCommands::Add { movie_id, title, poster } => {
            let outcome = client.add(&mut ctx.session, WatchlistEntry::new(movie_id, title, poster));
            output.toast(&outcome.toast);
            // Wait only so the request is not cut off by exit; failures are already logged
            outcome.dispatched.settle().await;
        }
        WatchlistCommands::Remove { movie_id } => {
            let outcome = client.remove(&mut ctx.session, movie_id).await;
            output.toast(&outcome.toast);
            output.watchlist(&outcome.view);
        }
    }

    Ok(())
}
