use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{Session, SessionUser};
use crate::cli::utils::{output_success, output_value};
use crate::cli::CliContext;
use crate::services::AuthResponse;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account and log in")]
    Register {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "MAINTRACK_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "MAINTRACK_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Logout from server")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { email, password } => {
            let session = ctx.session()?;
            let response = ctx.client()?.register(&email, &password).await?;
            store_login(ctx, session, &response)?;
            output_success(
                &ctx.output,
                &format!("Registered and logged in as {}", response.user.email),
                Some(json!({ "user": response.user })),
            )
        }
        AuthCommands::Login { email, password } => {
            let session = ctx.session()?;
            let response = ctx.client()?.login(&email, &password).await?;
            store_login(ctx, session, &response)?;
            output_success(
                &ctx.output,
                &format!("Logged in as {}", response.user.email),
                Some(json!({ "user": response.user })),
            )
        }
        AuthCommands::Logout => {
            let session = ctx.session()?;
            ctx.sessions.save(&session.logged_out())?;
            output_success(&ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = ctx.session()?;
            let status = json!({
                "server": session.server,
                "authenticated": session.is_authenticated(),
                "user": session.user,
            });
            output_value(&ctx.output, &status, |_| {
                println!("Server: {}", session.server);
                match &session.user {
                    Some(user) if session.is_authenticated() => {
                        println!("Logged in as {} (id {})", user.email, user.id)
                    }
                    _ => println!("Not logged in"),
                }
            })
        }
        AuthCommands::Whoami => {
            let user = ctx.client()?.whoami().await?;
            output_value(&ctx.output, &user, |user| {
                println!("{} (id {})", user.email, user.id);
                println!("Member since {}", user.created_at.format("%Y-%m-%d"));
            })
        }
    }
}

fn store_login(ctx: &CliContext, session: Session, response: &AuthResponse) -> anyhow::Result<()> {
    ctx.sessions.save(&Session {
        server: session.server,
        token: Some(response.token.clone()),
        user: Some(SessionUser {
            id: response.user.id,
            email: response.user.email.clone(),
        }),
    })
}
