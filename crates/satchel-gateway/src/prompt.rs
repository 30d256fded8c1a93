//! Prompt templates for the two model calls.
//!
//! The PDF itself travels as an inline data part next to the prompt text.

use satchel_core::gateway::NO_ANSWER;

pub fn summarize() -> String {
  "You are an expert at summarizing documents. Summarize the attached PDF \
   document in a short paragraph.\n\
   Respond with a JSON object of the form {\"summary\": string}."
    .to_owned()
}

pub fn extract(query: &str) -> String {
  format!(
    "You extract specific information from PDF documents.\n\
     The user has attached a PDF and asks for the information described in \
     the query below. Analyse the PDF and reply with the content that answers \
     the query. If the PDF contains nothing that answers it, reply with \
     exactly '{NO_ANSWER}'.\n\
     Respond with a JSON object of the form {{\"extractedContent\": string}}.\n\n\
     User query: {query}"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_embeds_query_and_sentinel() {
    let prompt = extract("List the chapter titles");
    assert!(prompt.ends_with("User query: List the chapter titles"));
    assert!(prompt.contains("exactly 'no answer'"));
    assert!(prompt.contains("{\"extractedContent\": string}"));
  }

  #[test]
  fn summarize_names_output_field() {
    assert!(summarize().contains("{\"summary\": string}"));
  }
}
