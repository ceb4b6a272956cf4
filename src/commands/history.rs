use anyhow::Result;
use colored::*;

use crate::cli::HistoryCommands;
use crate::HistoryTracker;

pub fn handle_history(history: &HistoryTracker, action: Option<&HistoryCommands>) -> Result<()> {
    match action.unwrap_or(&HistoryCommands::List { limit: 20 }) {
        HistoryCommands::List { limit } => {
            let items = history.get_recent(*limit)?;
            if items.is_empty() {
                println!(
                    "{}",
                    "No history yet. Strip or refine something to save it here.".dimmed()
                );
            }
            for item in &items {
                item.display();
            }
        }
        HistoryCommands::Show { id, input } => match history.find(id)? {
            Some(item) => {
                let content = if *input { &item.input } else { &item.output };
                println!("{}", content);
            }
            None => anyhow::bail!("No history entry matching '{}'", id),
        },
        HistoryCommands::Delete { id } => match history.delete(id)? {
            Some(item) => println!("{} Deleted '{}'", "✓".green(), item.title),
            None => anyhow::bail!("No history entry matching '{}'", id),
        },
        HistoryCommands::Clear => {
            history.clear()?;
            println!("{} History cleared", "✓".green());
        }
    }
    Ok(())
}
