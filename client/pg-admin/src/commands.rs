use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create a new account
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Optional contact number
        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Show the dashboard of the signed-in user
    Home,

    /// Sign out and forget the stored session
    SignOut,
}
