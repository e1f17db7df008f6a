//! Interactive prompts

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

const PAGE_SIZE: usize = 10;

/// Pick one entry from `items`, returning its index
pub fn select(prompt: &str, items: &[String]) -> Result<usize> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .max_length(PAGE_SIZE)
        .interact()?;
    Ok(index)
}

/// Read a line of text, re-asking until `validate` accepts it
pub fn input<F>(prompt: &str, default: Option<String>, validate: F) -> Result<String>
where
    F: FnMut(&String) -> Result<(), String>,
{
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    let value = input.validate_with(validate).interact_text()?;
    Ok(value.trim().to_string())
}

/// Yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
