use approx::assert_relative_eq;
use chart_kit::error::ChartError;
use chart_kit::layout::{
    ContainerSizer, DEFAULT_PADDING, InnerSize, Length, MeasuredBox, Padding, SizeResolution,
    to_percent,
};

#[test]
fn fixed_size_is_ready_without_measurement() {
    let sizer = ContainerSizer::new(Length::Pixels(600.0), Length::Pixels(400.0), Padding::default())
        .expect("valid sizer");
    assert!(!sizer.needs_measurement());
    let size = sizer.resolve(None).ready().expect("fixed size resolves");
    assert_eq!(size.inner(), InnerSize::new(520.0, 320.0));
    assert_eq!(size.translate(), (DEFAULT_PADDING, DEFAULT_PADDING));
}

#[test]
fn per_side_padding_overrides_general_padding() {
    let padding = Padding::uniform(10.0).with_left(50.0).with_bottom(30.0);
    let sizer = ContainerSizer::new(Length::Pixels(300.0), Length::Pixels(200.0), padding)
        .expect("valid sizer");
    let size = sizer.resolve(None).ready().expect("fixed size resolves");
    assert_eq!(size.inner(), InnerSize::new(240.0, 160.0));
    assert_eq!(size.translate(), (50.0, 10.0));
}

#[test]
fn inner_size_never_goes_negative() {
    let sizer = ContainerSizer::new(Length::Pixels(50.0), Length::Pixels(50.0), Padding::default())
        .expect("valid sizer");
    let size = sizer.resolve(None).ready().expect("fixed size resolves");
    assert_eq!(size.inner(), InnerSize::new(0.0, 0.0));
}

#[test]
fn percentage_waits_for_measurement() {
    let sizer = ContainerSizer::new(Length::parse("50%"), Length::Pixels(300.0), Padding::default())
        .expect("valid sizer");
    assert!(sizer.needs_measurement());
    assert_eq!(sizer.resolve(None), SizeResolution::NeedsMeasurement);

    let size = sizer
        .resolve(Some(MeasuredBox::new(1000.0, 800.0)))
        .ready()
        .expect("measured size resolves");
    assert_relative_eq!(size.width, 500.0);
    assert_relative_eq!(size.height, 300.0);
}

#[test]
fn zero_measurement_keeps_waiting() {
    let sizer = ContainerSizer::new(Length::Auto, Length::Auto, Padding::default())
        .expect("valid sizer");
    assert_eq!(
        sizer.resolve(Some(MeasuredBox::new(0.0, 400.0))),
        SizeResolution::NeedsMeasurement
    );
}

#[test]
fn set_measured_requests_exactly_one_rerender() {
    let mut sizer = ContainerSizer::new(Length::Auto, Length::parse("25%"), Padding::uniform(0.0))
        .expect("valid sizer");
    assert_eq!(sizer.current(), SizeResolution::NeedsMeasurement);

    let measured = MeasuredBox::new(640.0, 480.0);
    assert!(sizer.set_measured(measured).expect("finite box"));
    assert!(!sizer.set_measured(measured).expect("finite box"));
    let size = sizer.current().ready().expect("measured size resolves");
    assert_relative_eq!(size.width, 640.0);
    assert_relative_eq!(size.height, 120.0);
}

#[test]
fn fixed_sizer_ignores_measurements_for_rerender() {
    let mut sizer = ContainerSizer::new(Length::default(), Length::default(), Padding::default())
        .expect("valid sizer");
    assert!(!sizer.set_measured(MeasuredBox::new(10.0, 10.0)).expect("finite box"));
    let size = sizer.current().ready().expect("fixed size resolves");
    assert_relative_eq!(size.width, 500.0);
}

#[test]
fn invalid_dimensions_fail_fast() {
    let err = ContainerSizer::new(Length::Pixels(-1.0), Length::Pixels(10.0), Padding::default())
        .expect_err("negative width");
    assert!(matches!(err, ChartError::InvalidDimension(_)));

    let err = ContainerSizer::new(
        Length::Pixels(10.0),
        Length::Pixels(10.0),
        Padding::default().with_top(f64::NAN),
    )
    .expect_err("NaN padding");
    assert!(matches!(err, ChartError::InvalidDimension(_)));

    let mut sizer = ContainerSizer::new(Length::Auto, Length::Auto, Padding::default())
        .expect("valid sizer");
    assert!(sizer.set_measured(MeasuredBox::new(f64::INFINITY, 1.0)).is_err());
}

#[test]
fn length_parsing_covers_every_form() {
    assert_relative_eq!(to_percent("50%"), 0.5);
    assert_relative_eq!(to_percent(" 12.5 % "), 0.125);
    assert_relative_eq!(to_percent("wide"), 1.0);
    assert_eq!(Length::parse(""), Length::Auto);
    assert_eq!(Length::parse("420"), Length::Pixels(420.0));
    assert_eq!(Length::parse("80%"), Length::Percent(0.8));
    assert_eq!(Length::from(12.0), Length::Pixels(12.0));
}

#[test]
fn length_serde_accepts_numbers_and_strings() {
    let pixels: Length = serde_json::from_str("320").expect("number parses");
    assert_eq!(pixels, Length::Pixels(320.0));
    let percent: Length = serde_json::from_str("\"50%\"").expect("string parses");
    assert_eq!(percent, Length::Percent(0.5));
    assert_eq!(
        serde_json::to_string(&Length::Auto).expect("auto serializes"),
        "\"auto\""
    );
    assert_eq!(
        serde_json::to_string(&Length::Percent(0.5)).expect("percent serializes"),
        "\"50%\""
    );
}

#[test]
fn padding_serde_defaults_to_forty() {
    let padding: Padding = serde_json::from_str("{\"left\": 12}").expect("padding parses");
    assert_relative_eq!(padding.top(), 40.0);
    assert_relative_eq!(padding.left(), 12.0);
}
