use std::collections::BTreeSet;

use anyhow::Result;

use crate::app::App;

/// Add tenses to the exclusion set
pub fn run_exclude(app: &mut App, tenses: &[String]) -> Result<()> {
    let mut excluded: BTreeSet<String> = app.engine.excluded_tenses().into_iter().collect();
    for query in tenses {
        let id = app.find_tense(query)?;
        println!("Excluded {}", id);
        excluded.insert(id);
    }

    app.engine.set_excluded_tenses(&excluded);
    Ok(())
}

/// Remove tenses from the exclusion set
pub fn run_include(app: &mut App, tenses: &[String]) -> Result<()> {
    let mut excluded: BTreeSet<String> = app.engine.excluded_tenses().into_iter().collect();
    for query in tenses {
        let id = app.find_tense(query)?;
        if excluded.remove(&id) {
            println!("Included {}", id);
        } else {
            println!("{} was not excluded", id);
        }
    }

    app.engine.set_excluded_tenses(&excluded);
    Ok(())
}
