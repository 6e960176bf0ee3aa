//! Concurrency-safe gauge storage.
//!
//! A gauge records the *current* value of a measurement, sliced by label values.  This crate
//! provides the storage side of gauges: the points holding values, the containers mapping label
//! tuples to points, and the conversion of a container into a point-in-time [`Metric`] for export.
//! Serializing and shipping those metrics is left to exporters.
//!
//! # Gauges
//!
//! There are four kinds of gauge, along two axes:
//!
//! - [`LongGauge`] and [`DoubleGauge`] hold 64-bit integer and floating-point values respectively,
//!   which callers update directly through the points they get from
//!   [`get_or_create_time_series`](GaugeContainer::get_or_create_time_series).
//! - [`DerivedLongGauge`] and [`DerivedDoubleGauge`] hold values computed from tracked functions,
//!   registered through [`create_time_series`](GaugeContainer::create_time_series).  Functions are
//!   evaluated each time the gauge is exported.
//!
//! All four are [`GaugeContainer`]s, differing only in the type of point they hold.
//!
//! ```rust
//! # use std::time::SystemTime;
//! use metrics_gauge::{LabelKey, LongGauge, PointValue};
//!
//! let gauge = LongGauge::new("requests_in_flight", "Requests being served", "1", vec![
//!     LabelKey::new("method", "HTTP method"),
//! ]);
//!
//! let point = gauge.get_or_create_time_series(["GET"]).expect("one label value per key");
//! point.add(5).expect("integer input");
//! point.add(3).expect("integer input");
//!
//! let metric = gauge.get_metric(SystemTime::now()).expect("one time series");
//! assert_eq!(metric.time_series()[0].points()[0].value(), PointValue::Integer(8));
//! ```
//!
//! # Derived gauges and object lifetimes
//!
//! Derived gauges are often used to observe some object, such as the length of a queue.  Tracking
//! such an object through [`track`] holds only a weak reference to it: the gauge never keeps the
//! object alive, and once the object is dropped its time series simply stops being exported.
//!
//! ```rust
//! # use std::{sync::{Arc, Mutex}, time::SystemTime};
//! use metrics_gauge::{track, DerivedLongGauge};
//!
//! let queue = Arc::new(Mutex::new(vec![1, 2, 3]));
//! let gauge = DerivedLongGauge::new("queue_length", "Pending items", "1", vec![]);
//! gauge.create_default_time_series(track(&queue, |q: &Mutex<Vec<i32>>| q.lock().unwrap().len()));
//! assert!(gauge.get_metric(SystemTime::now()).is_some());
//!
//! drop(queue);
//! assert!(gauge.get_metric(SystemTime::now()).is_none());
//! ```
//!
//! # Concurrency
//!
//! Each point is updated atomically, and each gauge guards its map of points with its own lock.
//! That lock is only held while the map itself is read or modified: values are read, and tracked
//! functions called, after it has been released.  A panic raised by a tracked function therefore
//! propagates to the caller of [`get_metric`](GaugeContainer::get_metric) without affecting the
//! gauge.
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod builder;
pub use builder::GaugeBuilder;

mod derived;
pub use derived::{track, DerivedGaugePoint, TrackedFn, WeakFn};

mod error;
pub use error::GaugeError;

pub mod export;
pub use export::{
    Metric, MetricDescriptor, MetricProducer, Point, PointValue, TimeSeries, ToPointValue,
};

mod gauge;
pub use gauge::{DerivedDoubleGauge, DerivedLongGauge, DoubleGauge, GaugeContainer, LongGauge};

mod kind;
pub use kind::ValueKind;

mod label;
pub use label::{LabelKey, LabelValue, LabelValues};

mod number;
pub use number::Number;

mod point;
pub use point::{FloatGaugePoint, GaugePoint, IntegerGaugePoint};
