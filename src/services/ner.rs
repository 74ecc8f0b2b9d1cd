//! Named-entity spans from CoreNLP token tags.
//!
//! The corpus tags every token with an NER label (`PERSON`, `LOCATION`,
//! `O` for none, ...). An entity is a maximal run of adjacent tokens sharing
//! one label; the same label appearing again after a gap starts a new run.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Document, NamedEntity, Sentence, Token};

/// Iterator over `(tag, tokens)` runs of one sentence.
///
/// Created by [`group_ne_tokens`].
pub struct NeGroups<'a> {
    tokens: &'a [Token],
    skip_tags: &'a HashSet<&'a str>,
}

impl<'a> Iterator for NeGroups<'a> {
    type Item = (&'a str, &'a [Token]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let first = self.tokens.first()?;
            let tag = first.ner.as_str();
            let len = self
                .tokens
                .iter()
                .take_while(|t| t.ner == tag)
                .count();
            let (run, rest) = self.tokens.split_at(len);
            self.tokens = rest;

            if !self.skip_tags.contains(tag) {
                return Some((tag, run));
            }
        }
    }
}

/// Group a sentence's tokens into maximal runs of identical NER tags,
/// leaving out runs whose tag is in `skip_tags`. Tags are compared exactly.
pub fn group_ne_tokens<'a>(
    sentence: &'a Sentence,
    skip_tags: &'a HashSet<&'a str>,
) -> NeGroups<'a> {
    NeGroups {
        tokens: &sentence.tokens,
        skip_tags,
    }
}

/// Named entities of a sentence, one per retained tag run.
pub fn get_named_entities<'a>(
    sentence: &'a Sentence,
    skip_tags: &'a HashSet<&'a str>,
) -> impl Iterator<Item = NamedEntity> + 'a {
    group_ne_tokens(sentence, skip_tags).map(|(tag, run)| to_entity(tag, run))
}

fn to_entity(tag: &str, run: &[Token]) -> NamedEntity {
    // Runs are never empty.
    let start = run.first().map(|t| t.id.clone()).unwrap_or_default();
    let end = run.last().map(|t| t.id.clone()).unwrap_or_default();
    let text = run
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    NamedEntity {
        entity_type: tag.to_string(),
        start,
        end,
        text,
    }
}

/// Number of entity runs per tag across every sentence of a document.
pub fn count_entities(document: &Document, skip_tags: &HashSet<&str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for sentence in &document.sentences {
        for (tag, _) in group_ne_tokens(sentence, skip_tags) {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ymd;

    fn sentence(tags: &[&str]) -> Sentence {
        let tokens = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| Token {
                id: (i + 1).to_string(),
                word: format!("word{}", i),
                lemma: format!("word{}", i),
                begin: i * 6,
                end: i * 6 + 5,
                pos: "NNP".to_string(),
                ner: tag.to_string(),
            })
            .collect();
        Sentence {
            id: "1".to_string(),
            tokens,
        }
    }

    fn skip_o() -> HashSet<&'static str> {
        HashSet::from(["O"])
    }

    #[test]
    fn test_group_skips_tags() {
        let s = sentence(&["O", "O", "PERSON", "PERSON", "O", "LOCATION"]);
        let skip = skip_o();
        let groups: Vec<_> = group_ne_tokens(&s, &skip).collect();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "PERSON");
        assert_eq!(groups[0].1, &s.tokens[2..4]);
        assert_eq!(groups[1].0, "LOCATION");
        assert_eq!(groups[1].1, &s.tokens[5..6]);
    }

    #[test]
    fn test_named_entities() {
        let s = sentence(&["O", "O", "PERSON", "PERSON", "O", "LOCATION"]);
        let skip = skip_o();
        let entities: Vec<_> = get_named_entities(&s, &skip).collect();

        assert_eq!(
            entities,
            vec![
                NamedEntity {
                    entity_type: "PERSON".to_string(),
                    start: "3".to_string(),
                    end: "4".to_string(),
                    text: "word2 word3".to_string(),
                },
                NamedEntity {
                    entity_type: "LOCATION".to_string(),
                    start: "6".to_string(),
                    end: "6".to_string(),
                    text: "word5".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_skip_keeps_all_runs() {
        let s = sentence(&["O", "O", "PERSON", "O"]);
        let skip = HashSet::new();
        let tags: Vec<&str> = group_ne_tokens(&s, &skip).map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["O", "PERSON", "O"]);
    }

    #[test]
    fn test_non_adjacent_runs_stay_separate() {
        let s = sentence(&["ORG", "ORG", "O", "ORG"]);
        let skip = skip_o();
        let runs: Vec<usize> = group_ne_tokens(&s, &skip).map(|(_, run)| run.len()).collect();
        assert_eq!(runs, vec![2, 1]);
    }

    #[test]
    fn test_tags_case_sensitive() {
        let s = sentence(&["o", "O"]);
        let skip = skip_o();
        let tags: Vec<&str> = group_ne_tokens(&s, &skip).map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["o"]);
    }

    #[test]
    fn test_empty_sentence() {
        let s = sentence(&[]);
        let skip = HashSet::new();
        assert_eq!(group_ne_tokens(&s, &skip).count(), 0);
        assert_eq!(get_named_entities(&s, &skip).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let s = sentence(&["PERSON", "O", "DATE"]);
        let skip = skip_o();
        let first: Vec<_> = get_named_entities(&s, &skip).collect();
        let second: Vec<_> = get_named_entities(&s, &skip).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_entities() {
        let doc = Document {
            id: "NYT_ENG_19940701.0001".to_string(),
            date: Ymd::new(1994, 7, 1),
            doc_type: "story".to_string(),
            headline: None,
            dateline: None,
            text: None,
            sentences: vec![
                sentence(&["PERSON", "O", "PERSON"]),
                sentence(&["LOCATION", "LOCATION", "O"]),
            ],
            coreferences: Vec::new(),
        };

        let counts = count_entities(&doc, &skip_o());
        assert_eq!(counts.get("PERSON"), Some(&2));
        assert_eq!(counts.get("LOCATION"), Some(&1));
        assert_eq!(counts.get("O"), None);
    }
}
