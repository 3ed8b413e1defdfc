mod health_check;
mod signin;

pub use health_check::health_check;
pub use signin::signin;
pub use signin::signin_form;

/// Print an error followed by every error in its `source` chain, one per
/// line. Used as the `Debug` impl of route errors, so that the tracing
/// middleware logs the full chain rather than just the outermost message.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
