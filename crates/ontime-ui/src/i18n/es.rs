//! Spanish (primary locale) strings.

pub(super) const TABLE: &[(&str, &str)] = &[
    // Header
    ("header.title", "FlightOnTime"),
    ("header.status.operational", "Sistema Operativo"),
    ("header.status.limited", "Modo Limitado"),
    // Form
    ("form.title", "Predicción de Puntualidad"),
    ("form.description", "Ingrese los datos del vuelo para obtener una predicción basada en ML y datos meteorológicos"),
    ("form.airline", "Aerolínea"),
    ("form.origin", "Aeropuerto de Origen"),
    ("form.destination", "Aeropuerto de Destino"),
    ("form.departure", "Fecha y Hora de Partida"),
    ("form.submit", "Obtener Predicción"),
    ("form.mock", "Modo Demo (Mock)"),
    ("form.processing", "Procesando..."),
    // Results
    ("results.title", "Resultado de la Predicción"),
    ("results.ontime", "Puntual"),
    ("results.delayed", "Retrasado"),
    ("results.ontime.subtitle", "El vuelo tiene alta probabilidad de despegar a tiempo"),
    ("results.delayed.subtitle", "El vuelo podría experimentar retrasos"),
    // Metrics
    ("metrics.probability", "Probabilidad de Retraso"),
    ("metrics.confidence", "Confianza del Modelo"),
    ("metrics.distance", "Distancia del Vuelo"),
    // Weather
    ("weather.title", "Clima Detectado en Origen"),
    ("weather.condition", "Condición"),
    ("weather.temperature", "Temperatura"),
    ("weather.humidity", "Humedad"),
    ("weather.wind", "Viento"),
    ("weather.visibility", "Visibilidad"),
    // Metadata
    ("metadata.title", "Información del Vuelo"),
    ("metadata.airline", "Aerolínea"),
    ("metadata.route", "Ruta de Vuelo"),
    ("metadata.origin", "Origen"),
    ("metadata.destination", "Destino"),
    ("metadata.departure", "Salida Programada"),
    ("metadata.calculated", "Cálculo Realizado"),
    ("metadata.mode.label", "Modo del Sistema"),
    ("metadata.mode.mock", "🔧 Demo (Datos simulados)"),
    ("metadata.mode.real", "🚀 Predicción Real (Producción)"),
    ("metadata.mode.ml", "🚀 Demo con Modelo ML Real"),
    ("metadata.mode.fallback", "🔧 Demo (Fallback activo)"),
    ("metadata.note", "Nota del Sistema"),
    // Loading
    ("loading.text", "Analizando datos de vuelo y clima..."),
    // Errors
    ("error.same.airport", "⚠️ El aeropuerto de origen y destino deben ser diferentes"),
    ("error.not.found", "⚠️ No se hallan esos datos en la base de datos."),
    ("error.verify", "Por favor, verifique que:"),
    ("error.airline.valid", "• La aerolínea seleccionada sea válida"),
    ("error.airports.exist", "• Los aeropuertos de origen y destino existan en el sistema"),
    ("error.airlines.valid", "Aerolíneas válidas: LATAM, GOL, AZUL, AVIANCA, COPA, AMERICAN, UNITED, DELTA"),
    ("error.connection", "🔌 No se puede conectar con el servidor."),
    ("error.backend", "Verifique que el backend esté ejecutándose en {url}"),
    ("error.airport", "✈️ {message}"),
    ("error.airport.select", "Por favor, seleccione aeropuertos válidos de la lista."),
    ("error.timeout", "⏱️ La solicitud tardó demasiado tiempo."),
    ("error.server.busy", "El servidor puede estar sobrecargado. Intente nuevamente."),
    ("error.prediction", "Error al obtener predicción:"),
    ("error.generic", "⚠️ {message}"),
    // Settings
    ("settings.language", "Idioma"),
    ("settings.units", "Unidades de Distancia"),
    ("settings.units.km", "Kilómetros (km)"),
    ("settings.units.miles", "Millas (mi)"),
];
