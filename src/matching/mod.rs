// matching/ — Food-name resolution engine.
//
// Provides:
// - Text normalization (case, accents, allowed symbols)
// - Food index over the dataset keys, in declaration order
// - Compiled-in synonym hints
// - Ratcliff/Obershelp similarity
// - The exact → synonym → substring → fuzzy pipeline and "did you mean" suggestions

pub mod index;
pub mod normalize;
pub mod resolver;
pub mod similarity;
pub mod synonyms;
