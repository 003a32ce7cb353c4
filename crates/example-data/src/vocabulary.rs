//! Word lists used to assemble example postings.

/// Description shared by every generated posting.
const DEFAULT_DESCRIPTION: &str = "Our studio offers a cosy, warm practice space and is looking \
for an instructor to grow alongside our members.";

/// Lists of candidate values for each generated posting field.
///
/// [`Vocabulary::default`] returns the built-in yoga studio vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Posting titles.
    pub titles: Vec<String>,
    /// Studio locations.
    pub locations: Vec<String>,
    /// Yoga styles.
    pub styles: Vec<String>,
    /// Experience requirements.
    pub experiences: Vec<String>,
    /// Compensation ranges.
    pub compensations: Vec<String>,
    /// Body text for every posting.
    pub description: String,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            titles: owned(&[
                "Evening vinyasa yoga instructor wanted",
                "Weekend pilates group lesson instructor",
                "Hatha yoga beginner class instructor",
                "Yoga therapy instructor wanted",
                "Prenatal yoga instructor hiring",
                "Small-group yoga class instructor",
            ]),
            locations: owned(&[
                "Seoul Gangnam-gu",
                "Seoul Seocho-gu",
                "Seoul Songpa-gu",
                "Busan Haeundae-gu",
                "Incheon Namdong-gu",
                "Daegu Suseong-gu",
            ]),
            styles: owned(&[
                "Vinyasa",
                "Hatha",
                "Ashtanga",
                "Yoga therapy",
                "Pilates",
                "Aerial yoga",
            ]),
            experiences: owned(&["Any", "1+ years", "2+ years", "3-5 years"]),
            compensations: owned(&[
                "Hourly 30-40k KRW",
                "Hourly 40-50k KRW",
                "Monthly 2.0-2.5M KRW",
                "Monthly 2.5-3.0M KRW",
            ]),
            description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_has_every_list_populated() {
        let vocabulary = Vocabulary::default();

        assert_eq!(vocabulary.titles.len(), 6);
        assert_eq!(vocabulary.locations.len(), 6);
        assert_eq!(vocabulary.styles.len(), 6);
        assert_eq!(vocabulary.experiences.len(), 4);
        assert_eq!(vocabulary.compensations.len(), 4);
        assert!(!vocabulary.description.is_empty());
    }
}
