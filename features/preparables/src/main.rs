use std::{
    convert::Infallible,
    error::Error,
    sync::atomic::{AtomicU64, Ordering},
};

use preparables::{
    batch, resolver_fn, Batches, DynError, InjectError, Preparable, Preparer, Prefills,
    Requirement, Resolved, Resolver, Tag,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let preparer = Preparer::builder()
        .add_resolver(AuthorNames)
        .add_resolver(resolver_fn(|views: &Views| {
            Ok::<_, Infallible>(views.article_id * 100)
        }))
        .build()?;

    let mut articles = vec![Article::new(1, 42), Article::new(2, 42), Article::new(3, 7)];
    let report = preparer.prepare_all(&mut articles, &Prefills::new())?;
    println!("{:?}", report);
    for article in &articles {
        println!("{:?}", article);
    }

    // Views of a draft are known to be zero
    let mut draft = Article::new(4, 7);
    preparer.prepare_with(&mut draft, &Prefills::new().with("views", 0_u64))?;
    println!("{:?}", draft);

    Ok(())
}

/// Display name of an author, shared by all their articles
struct AuthorName {
    author_id: u64,
    cache_key: String,
}
impl Requirement for AuthorName {
    const TAG: Tag = Tag::new("author-name");
    fn key(&self) -> &str {
        "author"
    }
    fn is_cacheable(&self) -> bool {
        true
    }
    fn cache_key(&self) -> &str {
        &self.cache_key
    }
}

struct AuthorNames;
impl Resolver for AuthorNames {
    type Requirement = AuthorName;
    type Output = String;

    fn resolve(&self, requirement: &AuthorName) -> Result<String, impl Into<DynError>> {
        static LOOKUPS: AtomicU64 = AtomicU64::new(0);
        let lookup = LOOKUPS.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!("Looking up author {} (lookup #{})", requirement.author_id, lookup);
        Ok::<_, Infallible>(format!("Author #{}", requirement.author_id))
    }
}

/// View count of an article, changes all the time
struct Views {
    article_id: u64,
}
impl Requirement for Views {
    const TAG: Tag = Tag::new("views");
    fn key(&self) -> &str {
        "views"
    }
}

#[derive(Debug)]
struct Article {
    id: u64,
    author_id: u64,
    author: Option<String>,
    views: Option<u64>,
}
impl Article {
    fn new(id: u64, author_id: u64) -> Self {
        Article {
            id,
            author_id,
            author: None,
            views: None,
        }
    }
}
impl Preparable for Article {
    fn collect(&self) -> Batches {
        let author = AuthorName {
            author_id: self.author_id,
            cache_key: self.author_id.to_string(),
        };
        let views = Views {
            article_id: self.id,
        };
        Box::new([batch![author], batch![views]].into_iter())
    }

    fn inject(&mut self, key: &str, value: Resolved) -> Result<(), InjectError> {
        match key {
            "author" => self.author = Some(value.get()?),
            "views" => self.views = Some(value.get()?),
            other => return Err(InjectError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
