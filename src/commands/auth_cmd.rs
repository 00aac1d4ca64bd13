use clap::Args;

use inventory_admin::auth::{AuthGate, SessionAuth};
use inventory_admin::config::Config;

#[derive(Args)]
pub struct AuthCommand {
    /// Admin username
    #[arg(long, short)]
    pub username: String,

    /// Admin password
    #[arg(long, short)]
    pub password: String,
}

impl AuthCommand {
    pub fn login(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let auth = SessionAuth::new(&config.data_dir.value, config.admin.clone());
        let session = auth.login(&self.username, &self.password)?;
        println!("Logged in as {}", session.username);
        Ok(())
    }
}

pub fn logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let auth = SessionAuth::new(&config.data_dir.value, config.admin.clone());
    auth.logout()?;
    println!("Logged out");
    Ok(())
}
