//! Print a signed bearer token for local development.
//!
//! ```text
//! vitrine-mint-token <subject> [email] [ttl-minutes]
//! ```
//!
//! Reads `JWT_SECRET` and `ADMIN_EMAIL` the same way the server does. With
//! no email argument the configured administrator email is used.

use vitrine_api::auth::jwt::{generate_token, AuthConfig};

fn main() {
    dotenvy::dotenv().ok();

    let config = AuthConfig::from_env();
    let mut args = std::env::args().skip(1);

    let subject = args.next().unwrap_or_else(|| "local-admin".into());
    let email = args.next().unwrap_or_else(|| config.admin_email.clone());
    let ttl_mins: i64 = args
        .next()
        .map(|s| s.parse().expect("ttl-minutes must be an integer"))
        .unwrap_or(60);

    match generate_token(&subject, Some(&email), ttl_mins, &config) {
        Ok(token) => println!("{token}"),
        Err(err) => {
            eprintln!("failed to sign token: {err}");
            std::process::exit(1);
        }
    }
}
