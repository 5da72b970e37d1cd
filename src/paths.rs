use std::{path::PathBuf, sync::LazyLock};

pub static DEFAULT_LAUNCHER_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    let mut path = dirs::home_dir().unwrap_or_default();

    if std::env::var("X2LAUNCH_XDG_PATH").is_ok() {
        path.push(".config")
    }

    path.push("X2Launch");
    path
});

/// Computes the path from the launcher data directory based on the arguments.
///
/// Returns a `&Path` referencing the data directory itself if no arguments are passed in, or a
/// `PathBuf` created by joining all of the arguments to the base data directory if at least
/// one argument is passed in.
///
/// # Examples
///
/// ```
/// // Assuming `X2LAUNCH_XDG_PATH` is not set, the default data path is ~/X2Launch
/// let home = dirs::home_dir().unwrap_or_default();
/// assert_eq!(x2launch::launcher_path!(), home.join("X2Launch").as_path());
/// assert_eq!(
///     x2launch::launcher_path!("logs", "x.log"),
///     home.join("X2Launch").join("logs").join("x.log")
/// );
/// ```
#[macro_export]
macro_rules! launcher_path {
    () => {
        $crate::paths::DEFAULT_LAUNCHER_PATH.as_path()
    };

    ( $( $path:expr ),+ $(,)? ) => {
        [
            $crate::paths::DEFAULT_LAUNCHER_PATH.as_path(),
            $( std::path::Path::new(&$path) ),+
        ].into_iter().collect::<std::path::PathBuf>()
    };
}
