use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movieflix_models::FeedbackAction;

pub async fn run_recommend(ctx: &AppContext, output: &Output) -> Result<()> {
    output.banner(&format!("Recommendations for user {}", ctx.session.user()));

    let spinner = output.spinner("Loading recommendations...");
    let outcome = ctx.recommender().recommend_for_user(&ctx.session).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    output.movies(&outcome.view);
    if let Some(toast) = &outcome.toast {
        output.toast(toast);
    }
    Ok(())
}

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    output.banner(&format!("Because you searched for \"{}\"", query.trim()));

    let spinner = output.spinner("Finding similar movies...");
    let outcome = ctx.recommender().search_by_title(query).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    output.movies(&outcome.view);
    if let Some(toast) = &outcome.toast {
        output.toast(toast);
    }
    Ok(())
}

pub async fn run_movie(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    match ctx.recommender().movie_details(movie_id).await {
        Ok(movie) => output.movie_details(&movie),
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "Failed to load movie details");
            if e.is_not_found() {
                output.error(format!("Movie {} not found", movie_id));
            } else {
                output.error(format!("Could not load movie {}", movie_id));
            }
        }
    }
    Ok(())
}

pub async fn run_feedback(ctx: &AppContext, movie_id: u64, action: FeedbackAction, output: &Output) -> Result<()> {
    let (toast, dispatched) = ctx.recommender().feedback(&ctx.session, movie_id, action);
    output.toast(&toast);

    // The process is about to exit; let the request finish so it is not cut off
    dispatched.settle().await;
    Ok(())
}
