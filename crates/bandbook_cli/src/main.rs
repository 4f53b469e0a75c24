//! Command-line front end for the Bandbook catalog.
//!
//! Each subcommand takes the same `key=value` fields the web forms used,
//! runs one catalog operation, and prints a confirmation plus the result
//! as JSON.

use anyhow::{anyhow, Context, Result};
use bandbook_core::db::open_db;
use bandbook_core::{
    core_version, init_logging, AlbumConnectionForm, AlbumForm, BandForm, CatalogConfig,
    CatalogService, FormFields, MemberForm, MembershipForm, SqliteCatalogRepository,
};
use clap::{Parser, Subcommand};
use log::error;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "bandbook", version, about = "Music bands catalog")]
struct Cli {
    /// SQLite file; overrides BANDBOOK_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rolling log files; overrides BANDBOOK_LOG_DIR.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a band (bandname, formedyear, homelocation).
    AddBand(Fields),
    /// Add a member (membername).
    AddMember(Fields),
    /// Add an album (albumtitle, releaseyear).
    AddAlbum(Fields),
    /// Assign a member to a band (bandid, memberid, role, startyear, endyear).
    AddMembership(Fields),
    /// Replace every field of a membership.
    EditMembership {
        id: i64,
        #[command(flatten)]
        fields: Fields,
    },
    DeleteMembership {
        id: i64,
    },
    /// Assign an album to a band (bandid, albumid, bandconnection, releaseyear).
    AddAlbumConnection(Fields),
    /// Replace every field of an album connection.
    EditAlbumConnection {
        id: i64,
        #[command(flatten)]
        fields: Fields,
    },
    DeleteAlbumConnection {
        id: i64,
    },
    /// Every band with its members and albums.
    Bands,
    /// One band with its members and albums.
    Band {
        id: i64,
    },
    Members,
    Albums,
    Version,
}

#[derive(Debug, clap::Args)]
struct Fields {
    /// Form fields as key=value.
    #[arg(value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

impl Fields {
    fn form(&self) -> FormFields {
        self.fields.iter().cloned().collect()
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CatalogConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }

    if let Some(log_dir) = &config.log_dir {
        let log_dir = std::env::current_dir()
            .context("cannot resolve current directory")?
            .join(log_dir);
        init_logging(&config.log_level, &log_dir)?;
    }

    if matches!(cli.command, Command::Version) {
        println!("bandbook core_version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open catalog `{}`", config.db_path.display()))?;
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn)?);

    match cli.command {
        Command::AddBand(fields) => {
            let band = catalog.create_band(&BandForm::parse(&fields.form())?)?;
            report("Band added successfully", &band)
        }
        Command::AddMember(fields) => {
            let member = catalog.create_member(&MemberForm::parse(&fields.form())?)?;
            report("Member added successfully", &member)
        }
        Command::AddAlbum(fields) => {
            let album = catalog.create_album(&AlbumForm::parse(&fields.form())?)?;
            report("Album added successfully", &album)
        }
        Command::AddMembership(fields) => {
            let membership = catalog.create_membership(&MembershipForm::parse(&fields.form())?)?;
            report("Membership assigned", &membership)
        }
        Command::EditMembership { id, fields } => {
            let membership =
                catalog.update_membership(id, &MembershipForm::parse(&fields.form())?)?;
            report("Membership updated", &membership)
        }
        Command::DeleteMembership { id } => {
            catalog.delete_membership(id)?;
            println!("Membership removed");
            Ok(())
        }
        Command::AddAlbumConnection(fields) => {
            let connection =
                catalog.create_album_connection(&AlbumConnectionForm::parse(&fields.form())?)?;
            report("Album assigned to band", &connection)
        }
        Command::EditAlbumConnection { id, fields } => {
            let connection = catalog
                .update_album_connection(id, &AlbumConnectionForm::parse(&fields.form())?)?;
            report("Album connection updated", &connection)
        }
        Command::DeleteAlbumConnection { id } => {
            catalog.delete_album_connection(id)?;
            println!("Album connection removed");
            Ok(())
        }
        Command::Bands => print_json(&catalog.band_overview()?),
        Command::Band { id } => print_json(&catalog.band_detail(id)?),
        Command::Members => print_json(&catalog.list_members()?),
        Command::Albums => print_json(&catalog.list_albums()?),
        Command::Version => Err(anyhow!("version is handled before the catalog opens")),
    }
}

fn report(message: &str, record: &impl Serialize) -> Result<()> {
    println!("{message}");
    print_json(record)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_field, Cli, Command};
    use clap::Parser;

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("role=vocals=lead").unwrap(),
            ("role".to_string(), "vocals=lead".to_string())
        );
        assert_eq!(
            parse_field("releaseyear=").unwrap(),
            ("releaseyear".to_string(), String::new())
        );
    }

    #[test]
    fn parse_field_rejects_missing_equals() {
        assert!(parse_field("bandname").is_err());
    }

    #[test]
    fn edit_membership_takes_id_then_fields() {
        let cli = Cli::try_parse_from([
            "bandbook",
            "--db",
            "/tmp/x.sqlite3",
            "edit-membership",
            "4",
            "bandid=1",
            "memberid=2",
        ])
        .unwrap();

        match cli.command {
            Command::EditMembership { id, fields } => {
                assert_eq!(id, 4);
                assert_eq!(fields.fields.len(), 2);
                assert_eq!(fields.form().required_id("memberid").unwrap(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
