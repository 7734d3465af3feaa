use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use console_core::{AdminGateway, CredentialStore, HttpGateway};
use shared::{
    domain::{DepartmentId, EmployeeId, EventId, TeamId},
    protocol::{EventWritePayload, TeamQuery},
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:5000/api")]
    api_url: String,
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    ListTeams {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        leader: Option<String>,
    },
    DeleteTeam {
        team_id: String,
    },
    AddMember {
        team_id: String,
        employee_id: String,
    },
    RemoveMember {
        team_id: String,
        employee_id: String,
    },
    UpcomingEvents {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    CreateEvent {
        title: String,
        date: String,
        #[arg(long)]
        location: Option<String>,
    },
    DeleteEvent {
        event_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let credentials = CredentialStore::new();
    if let Some(token) = cli.token {
        credentials.set_token(token).await;
    }
    let gateway = HttpGateway::new(cli.api_url, credentials);

    match cli.command {
        Command::ListTeams { department, leader } => {
            let query = TeamQuery {
                department: department.map(DepartmentId::new),
                leader: leader.map(EmployeeId::new),
            };
            for team in gateway.list_teams(&query).await? {
                println!(
                    "{} {} (leader {}, {} members)",
                    team.id,
                    team.name,
                    team.leader.full_name(),
                    team.members.len(),
                );
            }
        }
        Command::DeleteTeam { team_id } => {
            gateway.delete_team(&TeamId::new(&team_id)).await?;
            println!("deleted team {team_id}");
        }
        Command::AddMember {
            team_id,
            employee_id,
        } => {
            gateway
                .add_team_member(&TeamId::new(&team_id), &EmployeeId::new(&employee_id))
                .await?;
            println!("added {employee_id} to team {team_id}");
        }
        Command::RemoveMember {
            team_id,
            employee_id,
        } => {
            gateway
                .remove_team_member(&TeamId::new(&team_id), &EmployeeId::new(&employee_id))
                .await?;
            println!("removed {employee_id} from team {team_id}");
        }
        Command::UpcomingEvents { limit } => {
            for event in gateway.upcoming_events(limit).await? {
                println!(
                    "{} {} {}",
                    event.id,
                    event.date.format("%Y-%m-%d %H:%M"),
                    event.title,
                );
            }
        }
        Command::CreateEvent {
            title,
            date,
            location,
        } => {
            let date = date.parse::<DateTime<Utc>>()?;
            let payload = EventWritePayload {
                title,
                description: None,
                date,
                location,
            };
            match gateway.create_event(&payload).await? {
                Some(event) => println!("created event {}", event.id),
                None => println!("created event"),
            }
        }
        Command::DeleteEvent { event_id } => {
            gateway.delete_event(&EventId::new(&event_id)).await?;
            println!("deleted event {event_id}");
        }
    }

    Ok(())
}
