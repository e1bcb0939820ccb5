use rand::seq::SliceRandom;

use crate::model::{Domain, Prompt, QuestionType};

struct CorpusEntry {
    id: &'static str,
    text: &'static str,
    question_type: QuestionType,
    domains: &'static [Domain],
}

use Domain::*;
use QuestionType::*;

const ENTRIES: &[CorpusEntry] = &[
    // ── Big Picture ──
    CorpusEntry { id: "bp-1", text: "Where do you see the marketing industry heading over the next three years?", question_type: BigPicture, domains: &[Marketing, Strategy] },
    CorpusEntry { id: "bp-2", text: "What's your take on the future of AI in everyday business operations?", question_type: BigPicture, domains: &[Ai, Strategy, Operations] },
    CorpusEntry { id: "bp-3", text: "How should companies think about building versus buying technology?", question_type: BigPicture, domains: &[Engineering, Strategy, Product] },
    CorpusEntry { id: "bp-4", text: "What does the ideal product organization look like two years from now?", question_type: BigPicture, domains: &[Product, Leadership] },
    CorpusEntry { id: "bp-5", text: "How do you think about competitive moats in the age of AI?", question_type: BigPicture, domains: &[Strategy, Ai, Product] },
    CorpusEntry { id: "bp-6", text: "How should companies balance growth and profitability?", question_type: BigPicture, domains: &[Finance, Strategy, Leadership] },
    CorpusEntry { id: "bp-7", text: "How do you see the relationship between design and business strategy evolving?", question_type: BigPicture, domains: &[Design, Strategy] },
    CorpusEntry { id: "bp-8", text: "How is the sales function being transformed by technology?", question_type: BigPicture, domains: &[Sales, Ai, Strategy] },
    // ── Drill Down ──
    CorpusEntry { id: "dd-1", text: "Walk me through how you'd launch a product in a new market segment.", question_type: DrillDown, domains: &[Marketing, Product, Strategy] },
    CorpusEntry { id: "dd-2", text: "How would you evaluate an AI tool before adopting it for your team?", question_type: DrillDown, domains: &[Ai, Operations, Engineering] },
    CorpusEntry { id: "dd-3", text: "Describe your process for prioritizing a product roadmap.", question_type: DrillDown, domains: &[Product, Strategy, Engineering] },
    CorpusEntry { id: "dd-4", text: "Walk me through how you'd build a financial model for a new initiative.", question_type: DrillDown, domains: &[Finance, Strategy] },
    CorpusEntry { id: "dd-5", text: "How would you restructure a sales team that keeps missing its targets?", question_type: DrillDown, domains: &[Sales, Leadership, Operations] },
    CorpusEntry { id: "dd-6", text: "Describe how you'd run a design sprint for a critical feature.", question_type: DrillDown, domains: &[Design, Product, Engineering] },
    CorpusEntry { id: "dd-7", text: "How would you implement OKRs for a team that's never used them?", question_type: DrillDown, domains: &[Leadership, Operations] },
    CorpusEntry { id: "dd-8", text: "How would you reduce customer acquisition cost by thirty percent?", question_type: DrillDown, domains: &[Marketing, Finance, Sales] },
    // ── Curveball ──
    CorpusEntry { id: "cb-1", text: "Your biggest competitor just shipped an AI feature that's getting rave reviews. What do you do?", question_type: Curveball, domains: &[Strategy, Product, Ai] },
    CorpusEntry { id: "cb-2", text: "Your top performer just quit and took two team members with them. How do you respond?", question_type: Curveball, domains: &[Leadership, Operations] },
    CorpusEntry { id: "cb-3", text: "The CEO just told you to cut your budget by forty percent. What stays and what goes?", question_type: Curveball, domains: &[Finance, Strategy, Leadership] },
    CorpusEntry { id: "cb-4", text: "A viral post is tearing into your product. What's your playbook?", question_type: Curveball, domains: &[Marketing, Leadership] },
    CorpusEntry { id: "cb-5", text: "Launch is in two weeks and your lead engineer says the core feature isn't ready. What do you do?", question_type: Curveball, domains: &[Product, Engineering, Leadership] },
    CorpusEntry { id: "cb-6", text: "A major client threatens to leave unless you match a competitor's price. How do you handle it?", question_type: Curveball, domains: &[Sales, Strategy, Finance] },
    CorpusEntry { id: "cb-7", text: "Your design and engineering teams are in constant conflict. How do you resolve it?", question_type: Curveball, domains: &[Design, Engineering, Leadership] },
    CorpusEntry { id: "cb-8", text: "You just learned your company's data was exposed in a breach. What are your first three moves?", question_type: Curveball, domains: &[Engineering, Leadership, Operations] },
    // ── Defend a Position ──
    CorpusEntry { id: "dp-1", text: "Why should we invest in brand marketing over performance marketing?", question_type: Defend, domains: &[Marketing, Strategy, Finance] },
    CorpusEntry { id: "dp-2", text: "Make the case for building AI capability in-house rather than buying it.", question_type: Defend, domains: &[Ai, Engineering, Strategy] },
    CorpusEntry { id: "dp-3", text: "Why should product managers own pricing decisions?", question_type: Defend, domains: &[Product, Finance, Strategy] },
    CorpusEntry { id: "dp-4", text: "Why should design have a seat at the executive table?", question_type: Defend, domains: &[Design, Leadership, Strategy] },
    CorpusEntry { id: "dp-5", text: "Argue for prioritizing existing-customer expansion over new-customer acquisition.", question_type: Defend, domains: &[Sales, Marketing, Finance] },
    CorpusEntry { id: "dp-6", text: "Why is technical debt worth paying down now rather than later?", question_type: Defend, domains: &[Engineering, Strategy, Finance] },
    CorpusEntry { id: "dp-7", text: "Make the case for open company financials with all employees.", question_type: Defend, domains: &[Finance, Leadership] },
    CorpusEntry { id: "dp-8", text: "Argue for hiring generalists over specialists in an early-stage company.", question_type: Defend, domains: &[Leadership, Strategy] },
    // ── Simplify ──
    CorpusEntry { id: "sm-1", text: "Explain machine learning to a non-technical executive in under a minute.", question_type: Simplify, domains: &[Ai, Leadership] },
    CorpusEntry { id: "sm-2", text: "How would you explain your company's business model to a twelve-year-old?", question_type: Simplify, domains: &[Strategy, Product] },
    CorpusEntry { id: "sm-3", text: "Explain why brand matters to someone who only cares about performance metrics.", question_type: Simplify, domains: &[Marketing, Finance] },
    CorpusEntry { id: "sm-4", text: "How would you explain product-market fit to someone outside tech?", question_type: Simplify, domains: &[Product, Strategy] },
    CorpusEntry { id: "sm-5", text: "How would you describe the value of design thinking to a finance person?", question_type: Simplify, domains: &[Design, Finance] },
    CorpusEntry { id: "sm-6", text: "Explain what a sales pipeline is to a creative director.", question_type: Simplify, domains: &[Sales, Design] },
    CorpusEntry { id: "sm-7", text: "How would you describe agile to a traditional project manager?", question_type: Simplify, domains: &[Engineering, Operations, Product] },
    CorpusEntry { id: "sm-8", text: "Explain the difference between strategy and tactics to a junior team member.", question_type: Simplify, domains: &[Strategy, Leadership] },
];

/// The built-in question corpus
pub struct Corpus {
    prompts: Vec<Prompt>,
}

impl Corpus {
    pub fn builtin() -> Self {
        let prompts = ENTRIES
            .iter()
            .map(|e| Prompt {
                id: e.id.to_string(),
                text: e.text.to_string(),
                question_type: e.question_type,
                domains: e.domains.to_vec(),
                difficulty: None,
            })
            .collect();
        Self { prompts }
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Fallback entry used when a domain filter empties the pool
    pub fn default_prompt(&self) -> Prompt {
        self.prompts[0].clone()
    }

    /// Choose a prompt for the given domains, avoiding already-seen ids
    ///
    /// Prompts sharing at least one domain form the pool; a type filter
    /// restricts it further. Unused prompts are preferred, but once every
    /// matching prompt has been seen, repeats are allowed. Selection among
    /// the final candidates is uniform-random.
    pub fn pick(
        &self,
        domains: &[Domain],
        used_ids: &[String],
        preferred_type: Option<QuestionType>,
    ) -> Prompt {
        let pool: Vec<&Prompt> = self
            .prompts
            .iter()
            .filter(|p| p.domains.iter().any(|d| domains.contains(d)))
            .filter(|p| preferred_type.map_or(true, |t| p.question_type == t))
            .collect();

        if pool.is_empty() {
            return self.default_prompt();
        }

        let unused: Vec<&Prompt> = pool
            .iter()
            .copied()
            .filter(|p| !used_ids.iter().any(|u| *u == p.id))
            .collect();

        let candidates = if unused.is_empty() { &pool } else { &unused };
        match candidates.choose(&mut rand::thread_rng()) {
            Some(prompt) => (*prompt).clone(),
            None => self.default_prompt(),
        }
    }

    pub(super) fn domain_pool(&self, domains: &[Domain]) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| p.domains.iter().any(|d| domains.contains(d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_covers_every_type_and_domain() {
        let corpus = Corpus::builtin();
        for t in QuestionType::ALL {
            assert!(
                corpus.prompts().iter().any(|p| p.question_type == t),
                "no prompts for {:?}",
                t
            );
        }
        for d in Domain::ALL {
            assert!(
                corpus.prompts().iter().any(|p| p.domains.contains(&d)),
                "no prompts for {:?}",
                d
            );
        }
    }

    #[test]
    fn corpus_entries_have_domains() {
        for p in Corpus::builtin().prompts() {
            assert!(!p.domains.is_empty(), "prompt {} has no domains", p.id);
        }
    }
}
