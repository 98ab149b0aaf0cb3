use crate::{count_words, Post, TitleFilter};

/// Titles with more words than this land in [`TitleFilter::MoreThanFiveWords`].
pub const TITLE_WORD_THRESHOLD: usize = 5;

/// Ordered output of [`classify`] plus the bucket sizes it produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub posts: Vec<Post>,
    pub more_than_five_words: usize,
    pub five_words_or_less: usize,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn filter_for(title: &str) -> TitleFilter {
    if count_words(title) > TITLE_WORD_THRESHOLD {
        TitleFilter::MoreThanFiveWords
    } else {
        TitleFilter::FiveWordsOrLess
    }
}

/// Tag every post with its title bucket and reorder.
///
/// Long titles come first, most commented first; short titles follow, highest
/// scored first. Both sorts are stable, so ties keep their incoming order. Any
/// existing tag is overwritten: the bucket depends on the title alone.
pub fn classify(posts: Vec<Post>) -> Classification {
    let (mut long, mut short): (Vec<Post>, Vec<Post>) = posts
        .into_iter()
        .map(|mut post| {
            post.applied_filter = Some(filter_for(&post.title));
            post
        })
        .partition(|post| post.applied_filter == Some(TitleFilter::MoreThanFiveWords));

    long.sort_by(|a, b| b.comments.cmp(&a.comments));
    short.sort_by(|a, b| b.points.cmp(&a.points));

    let more_than_five_words = long.len();
    let five_words_or_less = short.len();
    long.append(&mut short);

    Classification {
        posts: long,
        more_than_five_words,
        five_words_or_less,
    }
}
