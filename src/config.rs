use std::path::PathBuf;

/// Everything `run` needs to know before it opens the window.
///
/// The following pattern is recommended when creating a config:
///
/// ```
/// use mini_gl_triangle::Config;
///
/// let config = Config {
///     /* specify whichever fields you need to set, for example: */
///     window_size: (800.0, 600.0),
///     resizable: false,
///     .. Default::default()
/// };
/// ```
///
/// The [`config!`][crate::config!] macro is shorthand for exactly that, and [`ConfigBuilder`] is
/// there if you prefer setters.
#[derive(Clone, Debug, PartialEq, Builder)]
#[builder(default)]
pub struct Config {
    #[builder(setter(into))]
    pub window_title: String,
    /// Logical size of the window's client area.
    pub window_size: (f64, f64),
    pub resizable: bool,
    pub vsync: bool,
    /// Read relative to the working directory unless absolute.
    #[builder(setter(into))]
    pub vertex_shader: PathBuf,
    #[builder(setter(into))]
    pub fragment_shader: PathBuf,
    /// `None` leaves the context's clear color alone.
    pub clear_color: Option<[f32; 4]>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_title: "Hello triangle!".to_string(),
            window_size: (1280.0, 720.0),
            resizable: true,
            vsync: true,
            vertex_shader: PathBuf::from("Shader.vert"),
            fragment_shader: PathBuf::from("Shader.frag"),
            clear_color: None,
        }
    }
}

/// Builds a [`Config`] from the fields you name, defaulting the rest.
///
/// ```
/// use mini_gl_triangle::config;
///
/// let config = config! {
///     window_title: "Small".to_string(),
///     window_size: (320.0, 240.0),
/// };
/// assert_eq!(config.window_size, (320.0, 240.0));
/// assert!(config.resizable);
/// ```
#[macro_export]
macro_rules! config {
    () => {
        $crate::Config::default()
    };
    {$($k:ident: $v:expr),+ $(,)?} => {
        $crate::Config {
            $($k: $v),+,
            ..::std::default::Default::default()
        }
    };
}
