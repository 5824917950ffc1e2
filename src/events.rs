use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    Update,
}

/// Sends `Event::Update` every `interval` until dropped.
pub struct Ticker {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(interval: Duration, sink: mpsc::Sender<Event>) -> Ticker {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if sink.send(Event::Update).is_err() {
                        return;
                    }
                }
                _ => return,
            }
        });

        Ticker {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // Disconnecting wakes the ticker thread right away.
        self.stop.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Ticker thread panicked");
            }
        }
    }
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _ticker: Ticker,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::warn!("Failed to read input: {}", e),
                    }
                }
            })
        };

        let ticker = Ticker::spawn(config.tick_rate(), tx);

        Dispatcher {
            rx,
            _input_handle: input_handle,
            _ticker: ticker,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
