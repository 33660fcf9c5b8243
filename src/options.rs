use std::{str::FromStr, time::Duration};

use lifegrid::{
    Boundary, CellSize, Controls, Dims, Error, Result, RunnerConfig,
    runner::{Control, DEFAULT_INTERVAL},
};

/// Grid size when there is no terminal to fit
const HEADLESS_SIZE: usize = 125;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("", "headless", "run without a terminal surface");
        opts.optflag("", "paused", "do not start the simulation at launch");
        opts.optflag("", "frame", "tick once per display frame instead of on an interval");
        opts.optopt("w", "width", "set grid width", "COLS");
        opts.optopt("h", "height", "set grid height", "ROWS");
        opts.optopt("p", "prob", "probability a seeded cell is alive", "P");
        opts.optopt("b", "boundary", "edge policy: torus or bounded", "POLICY");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("", "cell-width", "terminal columns per cell", "N");
        opts.optopt("", "seed", "seed for a reproducible grid", "N");
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optmulti("", "unbind", "disable a control: start, stop or reset", "CONTROL");
        opts.optopt("", "log", "write logs to file", "FILE");
        opts
    }

    /// Parses `args`; [`None`] means help was printed and nothing should run
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifegrid [options]"));
            return Ok(None);
        }
        // a paused headless run has no way to ever start
        if matches.opt_present("headless") && matches.opt_present("paused") {
            return Err(Error::Conflict("paused", "headless"));
        }
        Ok(Some(Self { matches }))
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    /// Reads an option that must parse as `T` when present
    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>> {
        match self.matches.opt_str(name) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_option(name, value)),
            None => Ok(None),
        }
    }

    pub fn headless(&self) -> bool {
        self.matches.opt_present("headless")
    }
    pub fn paused(&self) -> bool {
        self.matches.opt_present("paused")
    }
    pub fn frame(&self) -> bool {
        self.matches.opt_present("frame")
    }

    pub fn generations(&self) -> Result<Option<u64>> {
        self.get("gens")
    }
    pub fn sleep(&self) -> Result<Duration> {
        Ok(self
            .get("sleep")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INTERVAL))
    }
    pub fn log_file(&self) -> Option<String> {
        self.matches.opt_str("log")
    }

    fn boundary(&self) -> Result<Boundary> {
        match self.matches.opt_str("boundary").as_deref() {
            None | Some("torus" | "toroidal" | "wrap") => Ok(Boundary::Toroidal),
            Some("bounded" | "edge") => Ok(Boundary::Bounded),
            Some(other) => Err(Error::invalid_option("boundary", other)),
        }
    }

    fn controls(&self) -> Result<Controls> {
        let mut controls = Controls::default();
        for name in self.matches.opt_strs("unbind") {
            let control = match name.as_str() {
                "start" => Control::Start,
                "stop" => Control::Stop,
                "reset" => Control::Reset,
                _ => return Err(Error::invalid_option("unbind", name)),
            };
            controls.unbind(control);
        }
        Ok(controls)
    }

    fn cell_size(&self) -> Result<CellSize> {
        if self.headless() {
            return Ok(CellSize::default());
        }
        match self.get::<u16>("cell-width")? {
            Some(0) => Err(Error::invalid_option("cell-width", "0")),
            // terminal cells are about twice as tall as they are wide
            width => Ok(CellSize::new(width.unwrap_or(2), 1)),
        }
    }

    /// Builds the runner configuration
    ///
    /// `surface` is the drawable terminal size in columns and rows; the
    /// grid defaults to filling it and never grows past it.
    pub fn runner_config(&self, surface: Option<(u16, u16)>) -> Result<RunnerConfig> {
        let cell_size = self.cell_size()?;
        let rows: Option<usize> = self.get("height")?;
        let cols: Option<usize> = self.get("width")?;
        let dims = match surface {
            Some((width, height)) => {
                let fit = cell_size.fit(width, height);
                Dims::new(
                    rows.map_or(fit.rows, |r| r.min(fit.rows)),
                    cols.map_or(fit.cols, |c| c.min(fit.cols)),
                )
            }
            None => Dims::new(
                rows.unwrap_or(HEADLESS_SIZE),
                cols.unwrap_or(HEADLESS_SIZE),
            ),
        };

        Ok(RunnerConfig {
            dims,
            alive_probability: self.get("prob")?.unwrap_or(0.3),
            boundary: self.boundary()?,
            cell_size,
            controls: self.controls()?,
            seed: self.get("seed")?,
        })
    }
}
