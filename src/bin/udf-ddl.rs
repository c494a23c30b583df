// Copyright 2025 Snowflake UDF Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! udf-ddl - render and plan DDL for Snowflake user-defined functions

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use tracing_subscriber::filter::LevelFilter;

use snowflake_udf::resource::{replacement_fields, Resource};
use snowflake_udf::{RecordingDatabase, ResourceData, UdfDefinition, UdfId, UdfResource};

/// udf-ddl - render and plan DDL for Snowflake user-defined functions
#[derive(Parser, Debug)]
#[command(name = "udf-ddl")]
#[command(author = "Snowflake UDF Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render and plan DDL for Snowflake user-defined functions")]
struct Args {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one statement from a definition file
    Render {
        statement: Statement,

        /// JSON function definition
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Target name for `rename`
        #[arg(long = "new-name")]
        new_name: Option<String>,
    },

    /// Encode or decode persisted identifiers
    Id {
        #[command(subcommand)]
        command: IdCommand,
    },

    /// Print the statements that move a function from one definition to another
    Plan {
        /// Definition currently applied
        #[arg(long = "prior")]
        prior: PathBuf,

        /// Definition to apply
        #[arg(long = "planned")]
        planned: PathBuf,

        /// Persisted identifier; derived from the prior definition when omitted
        #[arg(long = "id")]
        id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum IdCommand {
    /// Encode database, schema and name into an identifier
    Encode {
        database: String,
        schema: String,
        name: String,
    },
    /// Decode an identifier into its parts
    Decode { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Statement {
    Create,
    Rename,
    Secure,
    Unsecure,
    Show,
    Drop,
}

fn render(
    statement: Statement,
    def: &UdfDefinition,
    new_name: Option<String>,
) -> anyhow::Result<String> {
    let mut builder = def.builder();
    let q = match statement {
        Statement::Create => builder.create()?,
        Statement::Rename => {
            let Some(new_name) = new_name else {
                bail!("rename needs --new-name");
            };
            builder.rename(new_name)?
        }
        Statement::Secure => builder.secure()?,
        Statement::Unsecure => builder.unsecure()?,
        Statement::Show => builder.show(),
        Statement::Drop => builder.drop()?,
    };
    Ok(q)
}

fn plan(prior: &UdfDefinition, planned: &UdfDefinition, id: Option<String>) -> anyhow::Result<()> {
    let resource = UdfResource::new();
    let id = match id {
        Some(id) => id,
        None => UdfId::new(&prior.database, &prior.schema, &prior.name).encode()?,
    };
    let mut db = RecordingDatabase::new();

    let replace = replacement_fields(prior, planned);
    if !replace.is_empty() {
        println!("-- replacement required: {}", replace.join(", "));

        let mut old = ResourceData::from_state(id, prior.clone());
        resource.delete(&mut old, &mut db)?;

        let mut new = ResourceData::new(planned.clone());
        resource.create(&mut new, &mut db)?;
    } else {
        let mut d = ResourceData::from_state(id, prior.clone());
        d.plan(planned.clone());
        resource.update(&mut d, &mut db)?;
    }

    for q in db.statements() {
        println!("{};", q);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    snowflake_udf::logging::init(level);

    match args.command {
        Command::Render {
            statement,
            file,
            new_name,
        } => {
            let def = UdfDefinition::from_file(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            println!("{}", render(statement, &def, new_name)?);
        }
        Command::Id {
            command: IdCommand::Encode {
                database,
                schema,
                name,
            },
        } => {
            println!("{}", UdfId::new(database, schema, name).encode()?);
        }
        Command::Id {
            command: IdCommand::Decode { id },
        } => {
            let decoded = UdfId::decode(&id)?;
            let mut table = Table::new();
            table.set_header(vec!["database", "schema", "name"]);
            table.add_row(vec![
                decoded.database_name,
                decoded.schema_name,
                decoded.name,
            ]);
            println!("{table}");
        }
        Command::Plan { prior, planned, id } => {
            let prior_def = UdfDefinition::from_file(&prior)
                .with_context(|| format!("loading {}", prior.display()))?;
            let planned_def = UdfDefinition::from_file(&planned)
                .with_context(|| format!("loading {}", planned.display()))?;
            plan(&prior_def, &planned_def, id)?;
        }
    }

    Ok(())
}
