//! English (secondary locale) strings.

pub(super) const TABLE: &[(&str, &str)] = &[
    // Header
    ("header.title", "FlightOnTime"),
    ("header.status.operational", "System Operational"),
    ("header.status.limited", "Limited Mode"),
    // Form
    ("form.title", "Flight Punctuality Prediction"),
    ("form.description", "Enter flight details to get a prediction based on ML and real-time weather data"),
    ("form.airline", "Airline"),
    ("form.origin", "Origin Airport"),
    ("form.destination", "Destination Airport"),
    ("form.departure", "Departure Date and Time"),
    ("form.submit", "Get Prediction"),
    ("form.mock", "Demo Mode (Mock)"),
    ("form.processing", "Processing..."),
    // Results
    ("results.title", "Prediction Result"),
    ("results.ontime", "On Time"),
    ("results.delayed", "Delayed"),
    ("results.ontime.subtitle", "The flight has a high probability of departing on time"),
    ("results.delayed.subtitle", "The flight may experience delays"),
    // Metrics
    ("metrics.probability", "Delay Probability"),
    ("metrics.confidence", "Model Confidence"),
    ("metrics.distance", "Flight Distance"),
    // Weather
    ("weather.title", "Detected Weather at Origin"),
    ("weather.condition", "Condition"),
    ("weather.temperature", "Temperature"),
    ("weather.humidity", "Humidity"),
    ("weather.wind", "Wind"),
    ("weather.visibility", "Visibility"),
    // Metadata
    ("metadata.title", "Flight Information"),
    ("metadata.airline", "Airline"),
    ("metadata.route", "Flight Route"),
    ("metadata.origin", "Origin"),
    ("metadata.destination", "Destination"),
    ("metadata.departure", "Scheduled Departure"),
    ("metadata.calculated", "Calculated At"),
    ("metadata.mode.label", "System Mode"),
    ("metadata.mode.mock", "🔧 Demo (Simulated Data)"),
    ("metadata.mode.real", "🚀 Real Prediction (Production)"),
    ("metadata.mode.ml", "🚀 Demo with Real ML Model"),
    ("metadata.mode.fallback", "🔧 Demo (Fallback Active)"),
    ("metadata.note", "System Note"),
    // Loading
    ("loading.text", "Analyzing flight and weather data..."),
    // Errors
    ("error.same.airport", "⚠️ Origin and destination airports must be different"),
    ("error.not.found", "⚠️ Data not found in database."),
    ("error.verify", "Please verify that:"),
    ("error.airline.valid", "• The selected airline is valid"),
    ("error.airports.exist", "• Origin and destination airports exist in the system"),
    ("error.airlines.valid", "Valid airlines: LATAM, GOL, AZUL, AVIANCA, COPA, AMERICAN, UNITED, DELTA"),
    ("error.connection", "🔌 Cannot connect to server."),
    ("error.backend", "Verify that the backend is running at {url}"),
    ("error.airport", "✈️ {message}"),
    ("error.airport.select", "Please select valid airports from the list."),
    ("error.timeout", "⏱️ Request took too long."),
    ("error.server.busy", "Server may be overloaded. Please try again."),
    ("error.prediction", "Error getting prediction:"),
    ("error.generic", "⚠️ {message}"),
    // Settings
    ("settings.language", "Language"),
    ("settings.units", "Distance Units"),
    ("settings.units.km", "Kilometers (km)"),
    ("settings.units.miles", "Miles (mi)"),
];
