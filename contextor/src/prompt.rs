//! Prompt builder: one template per request, chosen by the pipeline.

use std::fmt;

use file_advisor::FileInfo;
use formula_store::ConversionContext;
use serde::Serialize;

/// System instruction sent with every provider call.
pub const DEFAULT_SYSTEM: &str =
    "You are a specialized calculation assistant that helps with calculations and unit conversions.";

const EXACT_FACTORS: &str = "IMPORTANT: You MUST use the EXACT conversion factors provided above, even if they differ from what you believe to be correct.";

/// Which template produced the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    FileRefinement,
    FileHelp,
    Decline,
    ContextConversion,
    BareNumber,
    GeneralCalculation,
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PromptKind::FileRefinement => "file_refinement",
            PromptKind::FileHelp => "file_help",
            PromptKind::Decline => "decline",
            PromptKind::ContextConversion => "context_conversion",
            PromptKind::BareNumber => "bare_number",
            PromptKind::GeneralCalculation => "general_calculation",
        };
        f.write_str(s)
    }
}

/// Asks the model to improve the canned command set for a large file.
pub fn file_refinement(info: &FileInfo, canned: &str) -> String {
    let target = info.target_format.as_deref().filter(|t| !t.is_empty());
    let mut out = String::from(
        "You are a specialized file conversion assistant that provides commands to convert files.\n\n",
    );
    out.push_str("The user has uploaded a file with the following information:\n");
    out.push_str(&format!("Filename: {}\n", info.name));
    out.push_str(&format!("File type: {}\n", info.mime_type));
    out.push_str(&format!("File size: {} bytes\n", info.size_bytes));
    if let Some(t) = target {
        out.push_str(&format!("Target format: {t}\n"));
    }
    out.push_str("\nPlease provide detailed terminal commands to:\n");
    out.push_str("1. Create a folder for the conversion\n");
    out.push_str("2. Move the file to that folder\n");
    out.push_str("3. Navigate to that folder\n");
    out.push_str("4. Install any necessary Python packages for conversion\n");
    match target {
        Some(t) => out.push_str(&format!(
            "5. Create a Python script to convert the file to {t} format\n"
        )),
        None => out.push_str("5. Create a Python script to convert the file to an appropriate format\n"),
    }
    out.push_str("6. Run the conversion script\n\n");
    out.push_str("Here's a basic command set that you can improve upon or optimize:\n\n");
    out.push_str(canned);
    out.push_str("\n\nPlease optimize these commands if needed based on the file type and size.\n");
    out.push_str("Format the commands clearly with code blocks for easy copying.");
    out
}

/// Explains the upload flow to a user asking about file conversion in prose.
pub fn file_help(message: &str) -> String {
    format!(
        "You are a specialized file conversion assistant.

The user is asking about file conversion: \"{message}\"

Provide information about how they can use this chat interface to drag and drop files for conversion,
and explain what file types are supported. Mention that they can receive terminal commands
and Python scripts to perform the conversion locally, as this is not an online conversion tool."
    )
}

pub fn decline(message: &str) -> String {
    format!(
        "You are a specialized calculation assistant that ONLY answers questions about calculations and unit conversions.

The user's query is: \"{message}\"

This query doesn't appear to be related to calculations or unit conversions. Politely decline to answer and explain that you can only assist with calculations and unit conversions."
    )
}

/// The user picked both units and is now sending the value.
pub fn context_conversion(message: &str, ctx: &ConversionContext, formula: &str) -> String {
    let mut out = format!(
        "{DEFAULT_SYSTEM}

The user has selected the following conversion:
From: {from}
To: {to}
Category: {category}

The user's input value is: \"{message}\"
",
        from = ctx.from,
        to = ctx.to,
        category = ctx.category,
    );
    if !formula.is_empty() {
        out.push_str(&format!(
            "\nHere is the formula information to help with this conversion:\n\n{formula}\n\n{EXACT_FACTORS}\n"
        ));
    }
    out.push_str(&format!(
        "\nPlease perform the conversion of {message} {} to {}.
Include the formula used and a step-by-step calculation.
Clearly state the final result.",
        ctx.from, ctx.to
    ));
    out
}

/// A lone number without unit context: ask which units are meant.
pub fn bare_number(message: &str, formula: &str) -> String {
    let mut out = format!(
        "{DEFAULT_SYSTEM}\n\nThe user has provided only a numeric value: {}\n",
        message.trim()
    );
    if !formula.is_empty() {
        out.push_str(&format!(
            "\nHere is the formula information that might be relevant:\n\n{formula}\n"
        ));
    }
    out.push_str(
        "\nSince the user has only provided a number, ask what units they would like to convert from and to.
Suggest some common conversions that might be applicable for this value.",
    );
    out
}

pub fn general_calculation(message: &str, formula: &str) -> String {
    let mut out = format!("{DEFAULT_SYSTEM}\n\nThe user's query is: \"{message}\"\n\n");
    if formula.is_empty() {
        out.push_str("This appears to be a calculation-related query. Provide a concise, accurate answer.\n");
    } else {
        out.push_str(&format!(
            "Here is the EXACT and CURRENT formula information to help answer this query. You MUST use ONLY these conversion rates and formulas, NOT any other values you might know:

{formula}

{EXACT_FACTORS} For example, if the formula says 1 hectare = 90,000 square meters, you must use this value in your calculations, NOT the standard 10,000 square meters value.

Using ONLY the formula information above, provide a concise, accurate answer to the user's query.
"
        ));
    }
    out.push_str(
        "\nYour response should be:
1. Focused only on the calculation or conversion requested
2. Concise and to the point
3. Include the formula used (if applicable)
4. Show the step-by-step calculation using ONLY the conversion factors provided
5. Clearly state the final result",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_prompt_embeds_formula_as_authoritative() {
        let p = general_calculation("convert 5 km to miles", "1 mile = 1.609344 kilometer");
        assert!(p.contains("The user's query is: \"convert 5 km to miles\""));
        assert!(p.contains("1 mile = 1.609344 kilometer"));
        assert!(p.contains("EXACT conversion factors"));
        assert!(p.ends_with("5. Clearly state the final result"));
    }

    #[test]
    fn general_prompt_without_formula() {
        let p = general_calculation("what is 2 + 2", "");
        assert!(p.contains("Provide a concise, accurate answer."));
        assert!(!p.contains("EXACT"));
    }

    #[test]
    fn context_prompt_names_units() {
        let ctx = ConversionContext {
            from: "Kilometers".into(),
            to: "Miles".into(),
            category: "Length".into(),
        };
        let p = context_conversion("5", &ctx, "1 mile = 1.609344 kilometer");
        assert!(p.contains("From: Kilometers\nTo: Miles\nCategory: Length"));
        assert!(p.contains("Please perform the conversion of 5 Kilometers to Miles."));
        assert!(p.contains(EXACT_FACTORS));

        let p = context_conversion("5", &ctx, "");
        assert!(!p.contains(EXACT_FACTORS));
    }

    #[test]
    fn refinement_prompt_embeds_canned_commands() {
        let info = FileInfo {
            name: "movie.mov".into(),
            mime_type: "video/quicktime".into(),
            size_bytes: 20_000_000,
            target_format: Some("mp4".into()),
        };
        let p = file_refinement(&info, "mkdir \"movie_conversion\"");
        assert!(p.contains("File size: 20000000 bytes"));
        assert!(p.contains("Target format: mp4"));
        assert!(p.contains("convert the file to mp4 format"));
        assert!(p.contains("mkdir \"movie_conversion\""));
    }

    #[test]
    fn decline_and_help_quote_the_message() {
        assert!(decline("tell me a joke").contains("\"tell me a joke\""));
        assert!(file_help("how to convert to webp").contains("drag and drop"));
    }
}
