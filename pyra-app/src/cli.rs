use clap::Parser;

/// Command line configuration for the window surface.
///
/// Everything else about the demo is fixed; only the surface itself is
/// configurable.
#[derive(Parser, Debug)]
#[command(
    name = "pyra",
    about = "Rotating colored pyramid rendered through modern OpenGL"
)]
pub struct Cli {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800, value_name = "PX")]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600, value_name = "PX")]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "Modern OpenGL")]
    pub title: String,

    /// Disable vertical sync
    #[arg(long)]
    pub no_vsync: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn test_defaults_match_the_original_window() {
        let cli = Cli::parse_from(["pyra"]);
        assert_eq!(cli.width, 800);
        assert_eq!(cli.height, 600);
        assert_eq!(cli.title, "Modern OpenGL");
        assert!(!cli.no_vsync);
    }

    #[test]
    fn test_surface_size_is_configurable() {
        let cli = Cli::parse_from(["pyra", "--width", "1024", "--height", "768"]);
        assert_eq!((cli.width, cli.height), (1024, 768));
    }
}
