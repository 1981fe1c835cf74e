//! Prompt assembly for each pipeline stage.
//!
//! Pure text functions, no I/O. The template text is a versioned constant
//! set: changing any string changes what every stage asks of the model, so
//! the exact wording (including its double spaces) is kept as shipped.

/// Reasoning directive appended to every stage prompt.
pub const STEP_BY_STEP: &str =
    "Let us work this out in a step by step way to be sure we have the right answer.";

/// Format directive keeping answers in prose.
pub const PARAGRAPHS_ONLY: &str =
    "Do not use lists or bullet points in your answer.  Respond using paragraphs.";

const QUESTION_PREAMBLE: &str = "The original question was: ";
const CRITIQUE_DIRECTIVE: &str =
    "Investigate the below responses and list the flaws and faulty logic of each answer option.";
const INCLUDE_ALL_RESPONSES: &str = "Make sure you include all of the responses in your answer.";
const RESPONSES_OFFERED: &str = "The below responses were offered:";
const CRITIQUE_PREAMBLE: &str =
    "A researcher reviewed the above answers and provided the following list of flaws and faulty logic:";
const SYNTHESIS_DIRECTIVE: &str =
    "Based on the available answers and the researcher's findings, find the best answer option and improve it.";
const SYNTHESIS_FORMAT: &str =
    "Write out your revised and completed answer below. Do not use lists or bullet points in your answer.  Respond using paragraphs.";

/// The prompt each agent session receives: the raw question plus the
/// reasoning and format directives.
pub fn build_agent_prompt(question: &str) -> String {
    format!("{question}\n\n{STEP_BY_STEP}\n\n{PARAGRAPHS_ONLY}\n\n")
}

/// The critique prompt: the question and every agent answer, in collection
/// order, inside the flaw-analysis template. No answer is ever dropped.
pub fn build_critique_prompt<S: AsRef<str>>(question: &str, answers: &[S]) -> String {
    let combined = join_answers(answers);
    format!(
        "{QUESTION_PREAMBLE}{question}\n\n{CRITIQUE_DIRECTIVE}\n\n{combined}\n\n\
         {PARAGRAPHS_ONLY}\n\n{INCLUDE_ALL_RESPONSES}\n\n{STEP_BY_STEP}\n\n"
    )
}

/// The synthesis prompt: question, every agent answer, and the critique
/// text, inside the pick-the-best-and-improve-it template.
pub fn build_synthesis_prompt<S: AsRef<str>>(
    question: &str,
    answers: &[S],
    critique: &str,
) -> String {
    let combined = join_answers(answers);
    format!(
        "{QUESTION_PREAMBLE}\n\n{question}\n\n{RESPONSES_OFFERED}\n\n{combined}\n\n\
         {CRITIQUE_PREAMBLE}\n\n{critique}\n\n{SYNTHESIS_DIRECTIVE}\n\n\
         {SYNTHESIS_FORMAT}\n\n{STEP_BY_STEP}"
    )
}

fn join_answers<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join("\n\n")
}
