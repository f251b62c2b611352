//! Entry stage: validate, translate, forward
//!
//! ```no_run
//! use static_i18n::{DirectoryTarget, Options, StaticI18n, source};
//! use std::path::Path;
//!
//! # async fn run() -> static_i18n::Result<()> {
//! let root = Path::new("site/src");
//! let input = source::read_files(root, source::collect_paths(root).await?);
//! let mut target = DirectoryTarget::new("site/build");
//!
//! let summary = StaticI18n::new(Some(&mut target), Options::new("site/locale"), input)
//!     .run()
//!     .await?;
//! println!("{} files -> {} outputs", summary.files, summary.outputs);
//! # Ok(())
//! # }
//! ```

use crate::config::Options;
use crate::error::{Error, Result};
use crate::file::SourceFile;
use crate::target::Target;
use crate::translator::{TranslateStream, Translator};
use futures::{Stream, StreamExt, ready, stream};
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::info;

/// Fails with [`Error::MissingFiles`] when there is nothing to write into
pub fn check_target<T: ?Sized>(target: Option<&T>) -> Result<()> {
    match target {
        Some(_) => Ok(()),
        None => Err(Error::MissingFiles),
    }
}

/// Counts reported by a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Input files consumed
    pub files: usize,
    /// Translated files written to the target
    pub outputs: usize,
    /// Locales each file was translated into
    pub locales: usize,
}

/// Translate every file of `input` into every locale and write the results
/// into `target`
pub struct StaticI18n<'a, T: ?Sized, S> {
    target: Option<&'a mut T>,
    options: Options,
    input: S,
}

impl<'a, T, S> StaticI18n<'a, T, S>
where
    T: Target + ?Sized,
    S: Stream<Item = Result<SourceFile>> + Unpin,
{
    /// Nothing is checked here; see [`StaticI18n::validate`] and [`StaticI18n::run`]
    pub fn new(target: Option<&'a mut T>, options: Options, input: S) -> Self {
        StaticI18n {
            target,
            options,
            input,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_target(self.target.as_deref())
    }

    /// Drive the pipeline to completion
    ///
    /// Each output is written before the next one is produced. The target's
    /// `finish` is only called when every input was translated.
    ///
    /// Catalogs are loaded once, after the first input file arrives, with
    /// blocking reads on the task driving this future.
    ///
    /// # Errors
    /// - [`Error::MissingFiles`] without a target, or when `input` ends before
    ///   yielding a file
    /// - [`Error::Configuration`] for unusable options
    /// - The first error produced by `input` or by the target
    pub async fn run(self) -> Result<RunSummary> {
        let StaticI18n {
            target,
            options,
            mut input,
        } = self;
        let target = target.ok_or(Error::MissingFiles)?;

        let first = match input.next().await {
            Some(item) => item?,
            None => return Err(Error::MissingFiles),
        };

        let translator = Translator::new(&options)?;
        let mut outputs = translator.stream_translator(stream::iter(Some(Ok(first))).chain(input));

        let mut written = 0;
        while let Some(file) = outputs.next().await {
            target.write(file?).await?;
            written += 1;
        }
        target.finish().await?;

        let summary = RunSummary {
            files: outputs.files_seen(),
            outputs: written,
            locales: translator.locales().len(),
        };
        info!(
            "Translated {} files into {} locales ({} outputs)",
            summary.files, summary.locales, summary.outputs
        );
        Ok(summary)
    }
}

/// The translation stage without a target
///
/// Nothing is read or loaded until the stream is first polled. The first
/// input item is pulled before the options are used, so an input that ends
/// without yielding a file produces a single [`Error::MissingFiles`] item even
/// when the options are unusable. Option errors are yielded the same way.
pub fn static_i18n<S>(options: &Options, input: S) -> StaticI18nStream<S>
where
    S: Stream<Item = Result<SourceFile>> + Unpin,
{
    StaticI18nStream {
        state: State::Waiting {
            options: options.clone(),
            input,
        },
    }
}

type Resumed<S> = stream::Chain<stream::Iter<std::option::IntoIter<Result<SourceFile>>>, S>;

enum State<S> {
    Waiting { options: Options, input: S },
    Translating(TranslateStream<Resumed<S>>),
    Done,
}

/// Stream returned by [`static_i18n`]
pub struct StaticI18nStream<S> {
    state: State<S>,
}

impl<S> StaticI18nStream<S> {
    /// The translator, once the first file has arrived
    pub fn translator(&self) -> Option<&Translator> {
        match &self.state {
            State::Translating(outputs) => Some(outputs.translator()),
            _ => None,
        }
    }
}

impl<S> Stream for StaticI18nStream<S>
where
    S: Stream<Item = Result<SourceFile>> + Unpin,
{
    type Item = Result<SourceFile>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                State::Waiting { options, input } => {
                    let first = match ready!(input.poll_next_unpin(cx)) {
                        Some(Ok(file)) => file,
                        Some(Err(e)) => {
                            this.state = State::Done;
                            return Poll::Ready(Some(Err(e)));
                        }
                        None => {
                            this.state = State::Done;
                            return Poll::Ready(Some(Err(Error::MissingFiles)));
                        }
                    };
                    let translator = match Translator::new(options) {
                        Ok(translator) => translator,
                        Err(e) => {
                            this.state = State::Done;
                            return Poll::Ready(Some(Err(e)));
                        }
                    };

                    let State::Waiting { input, .. } = std::mem::replace(&mut this.state, State::Done)
                    else {
                        return Poll::Ready(None);
                    };
                    let resumed = stream::iter(Some(Ok(first))).chain(input);
                    this.state = State::Translating(translator.stream_translator(resumed));
                }
                State::Translating(outputs) => {
                    let item = ready!(outputs.poll_next_unpin(cx));
                    if item.is_none() {
                        this.state = State::Done;
                    }
                    return Poll::Ready(item);
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}
